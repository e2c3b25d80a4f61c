//! End-to-end refresh of the browsed folder.
//!
//! Parse source -> resolve credentials -> route by port -> login ->
//! refresh -> reload the host view on success -> logout (always).
//!
//! Every failure is reported to the user exactly once, here. Failures before
//! routing never touch the network.

use std::sync::Arc;

use crate::backend::{RefreshOutcome, Refresher, RoutingTable};
use crate::credentials::{self, Credential, CredentialStore};
use crate::error::RefreshError;
use crate::host::{Notifier, Severity, UiRefresher};
use crate::path::to_native_path;
use crate::source::{self, SourceLocation};

/// Title for failures that happen before a backend is chosen.
const NOTIFY_TITLE: &str = "WebDAV Refresh";

/// One refresh invocation.
#[derive(Debug, Clone)]
pub struct RefreshRequest {
    /// URL of the folder being browsed.
    pub folder: String,
    pub recursive: bool,
}

/// What a run achieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// `true` when the view refresh was triggered.
    pub refreshed: bool,
    pub outcome: Option<RefreshOutcome>,
}

impl RunReport {
    fn failed() -> Self {
        Self {
            refreshed: false,
            outcome: None,
        }
    }
}

/// Wires the host collaborators to the backends.
pub struct Orchestrator<'a> {
    notifier: Arc<dyn Notifier>,
    ui: &'a dyn UiRefresher,
    store: &'a dyn CredentialStore,
    routes: RoutingTable,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        notifier: Arc<dyn Notifier>,
        ui: &'a dyn UiRefresher,
        store: &'a dyn CredentialStore,
        routes: RoutingTable,
    ) -> Self {
        Self {
            notifier,
            ui,
            store,
            routes,
        }
    }

    /// Run a full refresh for `request`. Never fails; the report says how it went.
    pub async fn run(&self, request: &RefreshRequest) -> RunReport {
        let (source, credential) = match self.prepare(request) {
            Ok(prepared) => prepared,
            Err(e) => {
                self.report(NOTIFY_TITLE, &e);
                return RunReport::failed();
            }
        };

        let kind = match self.routes.route(&source.endpoint) {
            Ok(kind) => kind,
            Err(e) => {
                self.report(NOTIFY_TITLE, &e);
                return RunReport::failed();
            }
        };

        let backend = kind.connect(&source.endpoint, credential, self.notifier.clone());
        self.run_session(backend, &source.path, request.recursive).await
    }

    /// Drive one backend session and log out afterwards, whatever happened.
    pub async fn run_session<R: Refresher>(
        &self,
        mut refresher: R,
        browser_path: &str,
        recursive: bool,
    ) -> RunReport {
        let outcome = self.drive(&mut refresher, browser_path, recursive).await;
        refresher.logout().await;

        match outcome {
            Some(outcome) => RunReport {
                refreshed: true,
                outcome: Some(outcome),
            },
            None => RunReport::failed(),
        }
    }

    async fn drive<R: Refresher>(
        &self,
        refresher: &mut R,
        browser_path: &str,
        recursive: bool,
    ) -> Option<RefreshOutcome> {
        let name = refresher.name();

        if let Err(e) = refresher.login().await {
            self.report(&stage_title(name, "login", &e), &e);
            return None;
        }

        let native_path = to_native_path(browser_path);
        match refresher.refresh(&native_path, recursive).await {
            Ok(outcome) => {
                // Only reload the view once the server has rebuilt its cache.
                self.ui.refresh_view();
                Some(outcome)
            }
            Err(e) => {
                self.report(&stage_title(name, "refresh", &e), &e);
                None
            }
        }
    }

    /// Parse the folder URL and find credentials for it.
    fn prepare(
        &self,
        request: &RefreshRequest,
    ) -> Result<(SourceLocation, Credential), RefreshError> {
        let source = source::parse_source(&request.folder)?;

        let credential = match source.credential.clone() {
            Some(credential) => credential,
            None => {
                log::info!("No credentials in path, searching credential store...");
                self.lookup_credential(&request.folder).ok_or_else(|| {
                    log::error!("Missing username or password for {}", request.folder);
                    RefreshError::Credential("Username or password not found".to_string())
                })?
            }
        };

        Ok((source, credential))
    }

    fn lookup_credential(&self, folder: &str) -> Option<Credential> {
        let entries = match self.store.entries() {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Error reading credential store: {}", e);
                return None;
            }
        };

        let found = credentials::resolve(folder, &entries);
        if found.is_some() {
            log::info!("Found credentials in credential store");
        }
        found
    }

    /// Log and notify `error`. The only place a terminal failure is logged.
    fn report(&self, title: &str, error: &RefreshError) {
        let severity = severity_of(error);
        match severity {
            Severity::Warning => log::warn!("{} ({} error): {}", title, error.kind(), error),
            _ => log::error!("{} ({} error): {}", title, error.kind(), error),
        }
        self.notifier.notify(title, &error.to_string(), severity);
    }
}

/// Unsupported endpoints are a warning; everything else is an error.
fn severity_of(error: &RefreshError) -> Severity {
    match error {
        RefreshError::UnsupportedEndpoint(_) => Severity::Warning,
        _ => Severity::Error,
    }
}

/// "OpenList login failed" for rejections, "... login error" for transport failures.
fn stage_title(backend: &str, stage: &str, error: &RefreshError) -> String {
    match error {
        RefreshError::Transport(_) => format!("{} {} error", backend, stage),
        _ => format!("{} {} failed", backend, stage),
    }
}
