//! Session client for OpenList/AList servers.
//!
//! Lifecycle: Unauthenticated -> (login) Authenticated -> (logout) Closed.
//! The token lives only inside this session and is wiped on logout.

use std::sync::Arc;

use crate::api::auth;
use crate::api::client::ApiClient;
use crate::credentials::Credential;
use crate::error::RefreshError;
use crate::host::{Notifier, Severity};
use crate::source::Endpoint;

use super::walker;
use super::{RefreshOutcome, Refresher};

const NOTIFY_TITLE: &str = "OpenList";

/// Authentication state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
    Closed,
}

/// One authenticated session against an OpenList server.
pub struct OpenListRefresher {
    api: ApiClient,
    credential: Credential,
    notifier: Arc<dyn Notifier>,
    state: SessionState,
}

impl OpenListRefresher {
    pub fn new(endpoint: &Endpoint, credential: Credential, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api: ApiClient::new(&endpoint.base_url()),
            credential,
            notifier,
            state: SessionState::Unauthenticated,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> SessionState {
        self.state
    }
}

impl Refresher for OpenListRefresher {
    fn name(&self) -> &'static str {
        "OpenList"
    }

    async fn login(&mut self) -> Result<(), RefreshError> {
        let token = auth::login(&self.api, &self.credential).await?;
        self.api.set_access_token(token);
        self.state = SessionState::Authenticated;
        log::info!("Logged in to {} as {}", self.api.base_url(), self.credential.username);
        Ok(())
    }

    async fn refresh(
        &mut self,
        native_path: &str,
        recursive: bool,
    ) -> Result<RefreshOutcome, RefreshError> {
        if self.state != SessionState::Authenticated || !self.api.has_access_token() {
            return Err(RefreshError::Auth("Not logged in".to_string()));
        }

        let start = if recursive {
            "Starting recursive refresh..."
        } else {
            "Starting refresh..."
        };
        self.notifier.notify(NOTIFY_TITLE, start, Severity::Info);

        let outcome = walker::walk(&self.api, self.notifier.as_ref(), native_path, recursive).await?;

        self.notifier
            .notify(NOTIFY_TITLE, "Refresh succeeded", Severity::Info);
        Ok(outcome)
    }

    async fn logout(&mut self) {
        if self.state != SessionState::Authenticated {
            self.state = SessionState::Closed;
            return;
        }

        match auth::logout(&self.api).await {
            Ok(()) => log::info!("Logged out of {}", self.api.base_url()),
            Err(e) => log::warn!("Logout from {} failed: {}", self.api.base_url(), e),
        }
        self.api.clear_access_token();
        self.state = SessionState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::source::Scheme;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<(String, Severity)>>,
    }

    impl Recorder {
        fn messages(&self) -> Vec<String> {
            self.seen.lock().unwrap().iter().map(|(m, _)| m.clone()).collect()
        }
    }

    impl Notifier for Recorder {
        fn notify(&self, _title: &str, message: &str, severity: Severity) {
            self.seen.lock().unwrap().push((message.to_string(), severity));
        }
    }

    fn endpoint_for(server: &MockServer) -> Endpoint {
        let addr = server.address();
        Endpoint {
            scheme: Scheme::Http,
            host: addr.ip().to_string(),
            port: Some(addr.port()),
        }
    }

    fn ok_json(data: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 200,
            "message": "success",
            "data": data
        }))
    }

    async fn mount_login(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/api/auth/login/hash"))
            .respond_with(ok_json(serde_json::json!({"token": "tok"})))
            .expect(1)
            .mount(server)
            .await;
    }

    fn refresher(server: &MockServer, notes: Arc<Recorder>) -> OpenListRefresher {
        OpenListRefresher::new(&endpoint_for(server), Credential::new("admin", "pw"), notes)
    }

    #[tokio::test]
    async fn test_login_then_logout_sends_token() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("GET"))
            .and(path("/api/auth/logout"))
            .and(header("Authorization", "tok"))
            .respond_with(ok_json(serde_json::Value::Null))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = refresher(&server, Arc::new(Recorder::default()));
        assert_eq!(session.state(), SessionState::Unauthenticated);
        session.login().await.unwrap();
        assert_eq!(session.state(), SessionState::Authenticated);
        session.logout().await;
        assert_eq!(session.state(), SessionState::Closed);

        // A second logout is a no-op; `expect(1)` verifies on drop.
        session.logout().await;
    }

    #[tokio::test]
    async fn test_failed_login_blocks_refresh_and_logout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login/hash"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": 403,
                "message": "password is incorrect"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/fs/list"))
            .respond_with(ok_json(serde_json::json!({"content": []})))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/auth/logout"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut session = refresher(&server, Arc::new(Recorder::default()));
        assert!(session.login().await.is_err());
        assert_eq!(session.state(), SessionState::Unauthenticated);

        let err = session.refresh("/Movies", false).await.unwrap_err();
        assert!(matches!(err, RefreshError::Auth(_)));
        session.logout().await;
    }

    #[tokio::test]
    async fn test_logout_ignores_error_status() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("GET"))
            .and(path("/api/auth/logout"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut session = refresher(&server, Arc::new(Recorder::default()));
        session.login().await.unwrap();
        session.logout().await;
        assert_eq!(session.state(), SessionState::Closed);
    }

    #[tokio::test]
    async fn test_recursive_refresh_survives_child_failure() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/fs/list"))
            .and(body_partial_json(serde_json::json!({"path": "/Shows", "refresh": true})))
            .respond_with(ok_json(serde_json::json!({
                "content": [
                    {"name": "Broken", "is_dir": true},
                    {"name": "Fine", "is_dir": true},
                    {"name": "notes.txt", "is_dir": false}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/fs/list"))
            .and(body_partial_json(serde_json::json!({"path": "/Shows/Broken/"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": 500,
                "message": "storage not found"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/fs/list"))
            .and(body_partial_json(serde_json::json!({"path": "/Shows/Fine/"})))
            .respond_with(ok_json(serde_json::json!({"content": null})))
            .expect(1)
            .mount(&server)
            .await;

        let notes = Arc::new(Recorder::default());
        let mut session = refresher(&server, notes.clone());
        session.login().await.unwrap();
        let outcome = session.refresh("/Shows", true).await.unwrap();
        assert_eq!(outcome, RefreshOutcome::Succeeded);

        let messages = notes.messages();
        assert_eq!(messages.first().map(String::as_str), Some("Starting recursive refresh..."));
        assert!(messages.iter().any(|m| m.contains("storage not found")));
        assert_eq!(messages.last().map(String::as_str), Some("Refresh succeeded"));
    }

    #[tokio::test]
    async fn test_root_refresh_is_skipped() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/fs/list"))
            .respond_with(ok_json(serde_json::json!({"content": []})))
            .expect(0)
            .mount(&server)
            .await;

        let notes = Arc::new(Recorder::default());
        let mut session = refresher(&server, notes.clone());
        session.login().await.unwrap();
        let outcome = session.refresh("/", false).await.unwrap();
        assert_eq!(outcome, RefreshOutcome::Skipped);
        assert!(notes.messages().iter().any(|m| m == "Skipping root directory"));
    }
}
