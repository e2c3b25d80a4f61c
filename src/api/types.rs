//! Request and response types for the OpenList/AList HTTP API.
//!
//! Every response is wrapped in a `{code, message, data}` envelope where
//! `code == 200` means success regardless of the HTTP status.

use serde::{Deserialize, Serialize};

/// Envelope `code` value for a successful call.
pub const CODE_OK: i64 = 200;

/// Common response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    /// Absent or `null` on most failures.
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn is_ok(&self) -> bool {
        self.code == CODE_OK
    }

    /// Server message, or `fallback` when absent or blank.
    pub fn message_or(&self, fallback: &str) -> String {
        match self.message.as_deref() {
            Some(msg) if !msg.trim().is_empty() => msg.to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// Login request body sent to POST /api/auth/login/hash.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    /// Salted SHA-256 of the password, hex encoded.
    pub password: String,
    pub otp_code: String,
}

/// `data` of the login response.
#[derive(Debug, Deserialize)]
pub struct LoginData {
    #[serde(default)]
    pub token: Option<String>,
}

/// Listing request body sent to POST /api/fs/list.
#[derive(Debug, Serialize)]
pub struct ListRequest {
    pub path: String,
    /// Folder password; empty for unprotected folders.
    pub password: String,
    pub page: u32,
    /// 0 lists every entry.
    pub per_page: u32,
    /// Bypass and rebuild the server-side listing cache.
    pub refresh: bool,
}

impl ListRequest {
    /// Full, cache-bypassing listing of `path`.
    pub fn refresh_all(path: &str) -> Self {
        Self {
            path: path.to_string(),
            password: String::new(),
            page: 1,
            per_page: 0,
            refresh: true,
        }
    }
}

/// `data` of the listing response.
#[derive(Debug, Deserialize)]
pub struct ListData {
    /// `null` for an empty directory.
    #[serde(default)]
    pub content: Option<Vec<ObjEntry>>,
    #[serde(default)]
    pub total: u64,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjEntry {
    /// Empty when the server omits it; such entries are never walked.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_dir: bool,
}
