//! HTTP client with auth header injection for the OpenList API.
//!
//! All requests carry a browser user agent and a `Referer` pointing at the
//! server's login page. Once a token is set it is sent verbatim in the
//! `Authorization` header (no `Bearer` prefix).

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, REFERER};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use zeroize::Zeroize;

/// Browser-identifying user agent sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                              (KHTML, like Gecko) Chrome/143.0.0.0 Safari/537.36";

/// HTTP client wrapper for one server.
///
/// Holds the base URL and, after login, the session token.
pub struct ApiClient {
    client: Client,
    base_url: String,
    referer: String,
    access_token: Option<String>,
}

impl ApiClient {
    /// Create a new API client with the given base URL.
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());
        let base_url = base_url.trim_end_matches('/').to_string();
        let referer = format!("{}/@login?redirect=%2F%40manage", base_url);
        Self {
            client,
            base_url,
            referer,
            access_token: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Store the session token for authenticated requests.
    pub fn set_access_token(&mut self, token: String) {
        self.clear_access_token();
        self.access_token = Some(token);
    }

    /// Wipe and drop the session token.
    pub fn clear_access_token(&mut self) {
        if let Some(ref mut token) = self.access_token {
            token.zeroize();
        }
        self.access_token = None;
    }

    pub fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }

    /// Send an unauthenticated POST with a JSON body. Used for login.
    pub async fn post<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        timeout: Duration,
    ) -> Result<Response, reqwest::Error> {
        self.request(Method::POST, path, timeout)
            .json(body)
            .send()
            .await
    }

    /// Send an authenticated POST with a JSON body.
    pub async fn authenticated_post<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        timeout: Duration,
    ) -> Result<Response, reqwest::Error> {
        self.authorize(self.request(Method::POST, path, timeout))
            .json(body)
            .send()
            .await
    }

    /// Send an authenticated GET.
    pub async fn authenticated_get(
        &self,
        path: &str,
        timeout: Duration,
    ) -> Result<Response, reqwest::Error> {
        self.authorize(self.request(Method::GET, path, timeout))
            .send()
            .await
    }

    fn request(&self, method: Method, path: &str, timeout: Duration) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .header(REFERER, &self.referer)
            .timeout(timeout)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.access_token {
            Some(ref token) => builder.header(AUTHORIZATION, token.as_str()),
            None => builder,
        }
    }
}
