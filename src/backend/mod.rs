//! Server backends able to refresh a remote listing cache.
//!
//! Each backend is one session: log in, refresh, log out. The routing table
//! in `routing` picks the backend for an endpoint.

pub mod openlist;
pub mod routing;
pub mod walker;

pub use openlist::OpenListRefresher;
pub use routing::{BackendKind, RoutingTable};

use crate::error::RefreshError;

/// Result of a successful top-level refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The target was the server root, which is never refreshed.
    Skipped,
    Succeeded,
}

/// Capability shared by all backends.
///
/// `logout` must be safe to call in any state and must not fail: errors are
/// logged by the implementation.
#[allow(async_fn_in_trait)]
pub trait Refresher {
    /// Backend name used in notification titles.
    fn name(&self) -> &'static str;

    async fn login(&mut self) -> Result<(), RefreshError>;

    /// Refresh `native_path`, walking subdirectories if `recursive`.
    async fn refresh(
        &mut self,
        native_path: &str,
        recursive: bool,
    ) -> Result<RefreshOutcome, RefreshError>;

    async fn logout(&mut self);
}

/// The closed set of backends the router can produce.
pub enum Backend {
    OpenList(OpenListRefresher),
}

impl Refresher for Backend {
    fn name(&self) -> &'static str {
        match self {
            Backend::OpenList(inner) => inner.name(),
        }
    }

    async fn login(&mut self) -> Result<(), RefreshError> {
        match self {
            Backend::OpenList(inner) => inner.login().await,
        }
    }

    async fn refresh(
        &mut self,
        native_path: &str,
        recursive: bool,
    ) -> Result<RefreshOutcome, RefreshError> {
        match self {
            Backend::OpenList(inner) => inner.refresh(native_path, recursive).await,
        }
    }

    async fn logout(&mut self) {
        match self {
            Backend::OpenList(inner) => inner.logout().await,
        }
    }
}
