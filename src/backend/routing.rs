//! Port-based routing of endpoints to backends.
//!
//! Servers of different families are told apart purely by the port they
//! listen on. New backends are added as table entries.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::credentials::Credential;
use crate::error::RefreshError;
use crate::host::Notifier;
use crate::source::Endpoint;

use super::{Backend, OpenListRefresher};

/// Default OpenList/AList HTTP port.
pub const OPENLIST_PORT: u16 = 5244;

/// Backend families the router knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    OpenList,
}

impl BackendKind {
    /// Construct an unauthenticated session of this kind.
    pub fn connect(
        &self,
        endpoint: &Endpoint,
        credential: Credential,
        notifier: Arc<dyn Notifier>,
    ) -> Backend {
        match self {
            BackendKind::OpenList => {
                Backend::OpenList(OpenListRefresher::new(endpoint, credential, notifier))
            }
        }
    }
}

/// Port -> backend mapping.
#[derive(Debug, Clone)]
pub struct RoutingTable {
    routes: BTreeMap<u16, BackendKind>,
}

impl RoutingTable {
    /// A table with no routes.
    pub fn empty() -> Self {
        Self {
            routes: BTreeMap::new(),
        }
    }

    /// Add (or replace) the backend served on `port`.
    pub fn with_route(mut self, port: u16, kind: BackendKind) -> Self {
        self.routes.insert(port, kind);
        self
    }

    /// Backend for the endpoint's effective port.
    pub fn route(&self, endpoint: &Endpoint) -> Result<BackendKind, RefreshError> {
        let port = endpoint.effective_port();
        match self.routes.get(&port) {
            Some(kind) => {
                log::info!("Port {} detected, using {:?} backend", port, kind);
                Ok(*kind)
            }
            None => Err(RefreshError::UnsupportedEndpoint(format!(
                "Port {} is not supported yet",
                port
            ))),
        }
    }
}

impl Default for RoutingTable {
    fn default() -> Self {
        Self::empty().with_route(OPENLIST_PORT, BackendKind::OpenList)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Scheme;

    fn endpoint(scheme: Scheme, port: Option<u16>) -> Endpoint {
        Endpoint {
            scheme,
            host: "nas".to_string(),
            port,
        }
    }

    #[test]
    fn test_default_routes_openlist_port() {
        let table = RoutingTable::default();
        let kind = table.route(&endpoint(Scheme::Http, Some(5244))).unwrap();
        assert_eq!(kind, BackendKind::OpenList);
    }

    #[test]
    fn test_unknown_port_is_unsupported() {
        let table = RoutingTable::default();
        let err = table.route(&endpoint(Scheme::Http, Some(8080))).unwrap_err();
        assert!(matches!(err, RefreshError::UnsupportedEndpoint(_)));
        assert_eq!(err.to_string(), "Port 8080 is not supported yet");
    }

    #[test]
    fn test_implicit_ports_use_scheme_default() {
        let table = RoutingTable::default();
        let err = table.route(&endpoint(Scheme::Https, None)).unwrap_err();
        assert_eq!(err.to_string(), "Port 443 is not supported yet");

        let table = table.with_route(443, BackendKind::OpenList);
        assert!(table.route(&endpoint(Scheme::Https, None)).is_ok());
        assert!(table.route(&endpoint(Scheme::Http, None)).is_err());
    }

    #[test]
    fn test_empty_table_routes_nothing() {
        let table = RoutingTable::empty();
        assert!(table.route(&endpoint(Scheme::Http, Some(5244))).is_err());
    }
}
