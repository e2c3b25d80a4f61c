//! API client module for OpenList/AList servers.
//!
//! Provides the HTTP client with auth header injection, the login/logout
//! calls, cache-refreshing directory listing, and the request/response types
//! of the server's JSON API.

pub mod auth;
pub mod client;
pub mod fs;
pub mod types;
