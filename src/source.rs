//! Parsing of the browsed folder URL into an endpoint, credentials and path.


use url::Url;

use crate::credentials::Credential;
use crate::error::RefreshError;

/// Transport scheme after WebDAV normalization (`dav` -> http, `davs` -> https).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    /// Normalize a source URL scheme. Returns `None` for unsupported schemes.
    pub fn from_source(scheme: &str) -> Option<Self> {
        match scheme {
            "http" | "dav" => Some(Scheme::Http),
            "https" | "davs" => Some(Scheme::Https),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    /// Conventional port when the URL does not give one.
    pub fn default_port(&self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

/// One remote server. Fixed for the duration of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub scheme: Scheme,
    pub host: String,
    pub port: Option<u16>,
}

impl Endpoint {
    /// Explicit port, or the scheme default.
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.scheme.default_port())
    }

    /// `scheme://host[:port]`, with the port only when it was explicit.
    pub fn base_url(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}", self.scheme.as_str(), self.host, port),
            None => format!("{}://{}", self.scheme.as_str(), self.host),
        }
    }
}

/// The browsed folder, split into the parts the refresh needs.
#[derive(Debug, Clone)]
pub struct SourceLocation {
    pub endpoint: Endpoint,
    /// Userinfo embedded in the folder URL, if complete.
    pub credential: Option<Credential>,
    /// Raw (still percent-encoded) browser path, e.g. `/dav/Movies`.
    pub path: String,
}

/// Parse the current folder URL.
///
/// Accepts `http`, `https`, `dav` and `davs`. Errors are user-facing.
pub fn parse_source(folder: &str) -> Result<SourceLocation, RefreshError> {
    let folder = folder.trim();
    if folder.is_empty() {
        return Err(RefreshError::Parse("Folder path not found".to_string()));
    }

    let url = Url::parse(folder).map_err(|e| {
        log::error!("Failed to parse folder URL: {}", e);
        RefreshError::Parse("URL parse error".to_string())
    })?;

    let scheme = Scheme::from_source(url.scheme()).ok_or_else(|| {
        RefreshError::UnsupportedEndpoint("Unrecognized WebDAV source".to_string())
    })?;

    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .map(|h| h.to_ascii_lowercase())
        .ok_or_else(|| RefreshError::Parse("Host name not found".to_string()))?;

    Ok(SourceLocation {
        endpoint: Endpoint {
            scheme,
            host,
            port: url.port(),
        },
        credential: Credential::from_url(&url),
        path: url.path().to_string(),
    })
}
