//! Login and Registration Pages
//!
//! Both post credentials, and on success turn the `{token, user}` response
//! into the active session, persist it, and send the user to the dashboard.

use std::sync::Arc;

use super::{LoadScope, Submission};
use crate::api::users;
use crate::client::{ApiRequest, ClientError, ClientResult, HttpClient};
use crate::models::{Credentials, Registration};
use crate::router::Route;
use crate::session::{Session, SessionStore};

/// Where a successful sign-in lands
pub const AFTER_SIGN_IN: Route = Route::Dashboard;

/// Shared sign-in flow: post, adopt the returned session, persist it
async fn sign_in(
    client: &HttpClient,
    store: &dyn SessionStore,
    scope: &LoadScope,
    request: ClientResult<ApiRequest>,
    what: &str,
) -> Submission {
    let request = match request {
        Ok(request) => request,
        Err(e) => return Submission::Failed(e),
    };

    let Some(result) = scope.run(client.fetch::<Session>(&request)).await else {
        return Submission::Cancelled;
    };

    let session = match result {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(error = %e, "{} failed", what);
            return Submission::Failed(e);
        }
    };

    tracing::info!(user = %session.user.name, role = %session.user.role, "{} succeeded", what);
    client.session().create(session);

    if let Err(e) = client.session().persist(store).await {
        // the in-memory session still works for this run
        tracing::warn!(error = %e, "Failed to persist session");
    }

    Submission::Completed
}

pub struct LoginPage {
    client: HttpClient,
    store: Arc<dyn SessionStore>,
    scope: LoadScope,
    draft: Credentials,
    last_error: Option<ClientError>,
}

impl LoginPage {
    pub fn new(client: HttpClient, store: Arc<dyn SessionStore>) -> Self {
        Self {
            client,
            store,
            scope: LoadScope::new(),
            draft: Credentials::default(),
            last_error: None,
        }
    }

    pub fn route(&self) -> Route {
        Route::Login
    }

    pub fn scope(&self) -> &LoadScope {
        &self.scope
    }

    pub fn draft(&self) -> &Credentials {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Credentials {
        &mut self.draft
    }

    pub fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    /// Sign in; on success navigate to [`AFTER_SIGN_IN`]
    pub async fn submit(&mut self) -> Submission {
        let outcome = sign_in(
            &self.client,
            self.store.as_ref(),
            &self.scope,
            users::login(&self.draft),
            "Login",
        )
        .await;

        self.last_error = match &outcome {
            Submission::Failed(e) => Some(e.clone()),
            _ => None,
        };
        if outcome.is_completed() {
            self.draft = Credentials::default();
        }
        outcome
    }
}

pub struct RegisterPage {
    client: HttpClient,
    store: Arc<dyn SessionStore>,
    scope: LoadScope,
    draft: Registration,
    last_error: Option<ClientError>,
}

impl RegisterPage {
    pub fn new(client: HttpClient, store: Arc<dyn SessionStore>) -> Self {
        Self {
            client,
            store,
            scope: LoadScope::new(),
            draft: Registration::default(),
            last_error: None,
        }
    }

    pub fn route(&self) -> Route {
        Route::Register
    }

    pub fn scope(&self) -> &LoadScope {
        &self.scope
    }

    pub fn draft(&self) -> &Registration {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Registration {
        &mut self.draft
    }

    pub fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    /// Create the account and sign in as it
    pub async fn submit(&mut self) -> Submission {
        let outcome = sign_in(
            &self.client,
            self.store.as_ref(),
            &self.scope,
            users::register(&self.draft),
            "Registration",
        )
        .await;

        self.last_error = match &outcome {
            Submission::Failed(e) => Some(e.clone()),
            _ => None,
        };
        if outcome.is_completed() {
            self.draft = Registration::default();
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::Role;
    use crate::session::{MemorySessionStore, SessionContext};
    use crate::testing::FakeBackend;
    use serde_json::json;

    fn session_body() -> serde_json::Value {
        json!({"token": "jwt-123", "user": {"id": 1, "name": "Ana", "role": "Admin"}})
    }

    #[tokio::test]
    async fn test_login_creates_and_persists_session() {
        let backend = FakeBackend::start().await;
        backend.respond("POST", "/users/login", 200, session_body());

        let session = SessionContext::new();
        let store = Arc::new(MemorySessionStore::default());
        let mut page = LoginPage::new(backend.client(session.clone()), store.clone());

        page.draft_mut().email = "ana@example.com".to_string();
        page.draft_mut().password = "secret".to_string();
        assert_eq!(page.submit().await, Submission::Completed);

        assert_eq!(session.token().as_deref(), Some("jwt-123"));
        assert_eq!(session.user().map(|u| u.role), Some(Role::Admin));
        assert_eq!(store.load().await.unwrap().map(|s| s.token), Some("jwt-123".to_string()));
        assert_eq!(page.draft(), &Credentials::default());

        let login = &backend.requests_to("POST", "/users/login")[0];
        assert_eq!(login.bearer, None);
        assert_eq!(
            login.body,
            Some(json!({"email": "ana@example.com", "password": "secret"}))
        );
    }

    #[tokio::test]
    async fn test_bad_credentials() {
        let backend = FakeBackend::start().await;
        backend.respond("POST", "/users/login", 401, json!({"error": "Invalid credentials"}));

        let session = SessionContext::new();
        let store = Arc::new(MemorySessionStore::default());
        let mut page = LoginPage::new(backend.client(session.clone()), store.clone());
        page.draft_mut().email = "ana@example.com".to_string();

        assert!(matches!(page.submit().await, Submission::Failed(_)));
        assert!(!session.is_authenticated());
        assert_eq!(store.load().await.unwrap(), None);
        assert_eq!(page.draft().email, "ana@example.com");
        assert_eq!(page.last_error().and_then(|e| e.status()), Some(401));
    }

    #[tokio::test]
    async fn test_register_signs_in() {
        let backend = FakeBackend::start().await;
        backend.respond("POST", "/users/register", 201, session_body());

        let session = SessionContext::new();
        let mut page = RegisterPage::new(
            backend.client(session.clone()),
            Arc::new(MemorySessionStore::default()),
        );
        {
            let draft = page.draft_mut();
            draft.name = "Ana".to_string();
            draft.email = "ana@example.com".to_string();
            draft.password = "secret".to_string();
        }

        assert_eq!(page.submit().await, Submission::Completed);
        assert!(session.is_authenticated());
        assert_eq!(
            backend.requests_to("POST", "/users/register")[0].body,
            Some(json!({"name": "Ana", "email": "ana@example.com", "password": "secret"}))
        );
    }

    #[tokio::test]
    async fn test_malformed_session_response() {
        let backend = FakeBackend::start().await;
        backend.respond("POST", "/users/login", 200, json!({"ok": true}));

        let session = SessionContext::new();
        let mut page = LoginPage::new(
            backend.client(session.clone()),
            Arc::new(MemorySessionStore::default()),
        );

        assert!(matches!(
            page.submit().await,
            Submission::Failed(ClientError::Decode(_))
        ));
        assert!(!session.is_authenticated());
    }
}
