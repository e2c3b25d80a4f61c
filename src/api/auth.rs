//! Login and logout against the OpenList auth endpoints.
//!
//! The server never receives the plaintext password: the hash endpoint
//! expects `sha256("{password}-{salt}")` with the salt fixed by the AList
//! family of servers.

use std::time::Duration;

use sha2::{Digest, Sha256};

use super::client::ApiClient;
use super::types::{ApiResponse, LoginData, LoginRequest};
use crate::credentials::Credential;
use crate::error::RefreshError;

/// Static salt appended to the password before hashing.
pub const STATIC_HASH_SALT: &str = "https://github.com/alist-org/alist";

const LOGIN_PATH: &str = "/api/auth/login/hash";
const LOGOUT_PATH: &str = "/api/auth/logout";

const LOGIN_TIMEOUT: Duration = Duration::from_secs(10);
const LOGOUT_TIMEOUT: Duration = Duration::from_secs(5);

/// Hex-encoded SHA-256 of `"{password}-{STATIC_HASH_SALT}"`.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(b"-");
    hasher.update(STATIC_HASH_SALT.as_bytes());
    hex::encode(hasher.finalize())
}

/// Log in and return the session token.
///
/// Does not store the token; the caller decides what to do with it.
pub async fn login(client: &ApiClient, credential: &Credential) -> Result<String, RefreshError> {
    let request = LoginRequest {
        username: credential.username.clone(),
        password: hash_password(&credential.password),
        otp_code: String::new(),
    };

    log::info!("Logging into {}{}", client.base_url(), LOGIN_PATH);

    let resp = client.post(LOGIN_PATH, &request, LOGIN_TIMEOUT).await?;
    let status = resp.status();
    let body = resp.text().await?;

    let login_resp: ApiResponse<LoginData> = serde_json::from_str(&body).map_err(|e| {
        log::error!("Unparseable login response (HTTP {}): {}", status, e);
        RefreshError::Auth(format!("Malformed login response (HTTP {})", status))
    })?;

    if !login_resp.is_ok() {
        return Err(RefreshError::Auth(login_resp.message_or("Unknown error")));
    }

    login_resp
        .data
        .and_then(|data| data.token)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| RefreshError::Auth("No token in response".to_string()))
}

/// Invalidate the session token on the server.
///
/// The response body is ignored; only transport success matters.
pub async fn logout(client: &ApiClient) -> Result<(), reqwest::Error> {
    client.authenticated_get(LOGOUT_PATH, LOGOUT_TIMEOUT).await?;
    Ok(())
}
