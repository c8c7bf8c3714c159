//! Session Context
//!
//! The signed-in user's credential and profile, held in one explicit object
//! that is handed to the HTTP client, the route guard and the shell.
//!
//! ## Lifecycle
//!
//! 1. `create` on login or registration success
//! 2. read by the guard, the shell and every outgoing request
//! 3. `destroy` on logout
//!
//! Persistence lives behind [`SessionStore`] so a restarted shell picks the
//! session back up.

mod store;

pub use store::{FileSessionStore, MemorySessionStore, SessionError, SessionStore};

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::access::{Capability, Role};
use crate::models::Id;

/// Profile of the authenticated user as returned by login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Id,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
}

/// Credential plus profile; also the login/registration response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

/// Shared handle to the current session
///
/// Clones share the same slot, so a logout seen by the shell is seen by the
/// HTTP client on its next request.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionContext {
    /// Create an empty (signed-out) context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context that already holds a session
    pub fn with_session(session: Session) -> Self {
        let ctx = Self::new();
        ctx.create(session);
        ctx
    }

    /// Rehydrate from persistent storage
    pub async fn restore(store: &dyn SessionStore) -> Result<Self, SessionError> {
        let ctx = Self::new();
        if let Some(session) = store.load().await? {
            tracing::debug!(user = %session.user.name, "Restored session");
            ctx.create(session);
        }
        Ok(ctx)
    }

    /// Install a new session, replacing any existing one
    pub fn create(&self, session: Session) {
        *self.write() = Some(session);
    }

    /// Drop the current session, returning it
    pub fn destroy(&self) -> Option<Session> {
        self.write().take()
    }

    pub fn current(&self) -> Option<Session> {
        self.read().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.read().as_ref().map(|s| s.user.clone())
    }

    /// True when a token is present; validity is only known to the backend
    pub fn is_authenticated(&self) -> bool {
        self.read().as_ref().is_some_and(|s| !s.token.is_empty())
    }

    /// Capability check against the signed-in user's role
    pub fn can(&self, capability: Capability) -> bool {
        self.read()
            .as_ref()
            .is_some_and(|s| s.user.role.can(capability))
    }

    /// Write the current session through to storage
    pub async fn persist(&self, store: &dyn SessionStore) -> Result<(), SessionError> {
        match self.current() {
            Some(session) => store.save(&session).await,
            None => store.clear().await,
        }
    }

    /// Destroy the session and clear it from storage
    pub async fn logout(&self, store: &dyn SessionStore) -> Result<(), SessionError> {
        if let Some(session) = self.destroy() {
            tracing::info!(user = %session.user.name, "Logged out");
        }
        store.clear().await
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
pub(crate) fn test_session(role: &str) -> Session {
    Session {
        token: "test-token".to_string(),
        user: SessionUser {
            id: 1,
            name: "Test User".to_string(),
            email: Some("test@example.com".to_string()),
            role: Role::from(role),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let ctx = SessionContext::new();
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.token(), None);

        ctx.create(test_session("user"));
        assert!(ctx.is_authenticated());
        assert_eq!(ctx.token().as_deref(), Some("test-token"));

        let dropped = ctx.destroy();
        assert!(dropped.is_some());
        assert!(!ctx.is_authenticated());
    }

    #[test]
    fn test_clones_share_state() {
        let ctx = SessionContext::with_session(test_session("Admin"));
        let seen_by_client = ctx.clone();

        ctx.destroy();
        assert_eq!(seen_by_client.token(), None);
    }

    #[test]
    fn test_capabilities_follow_role() {
        let ctx = SessionContext::with_session(test_session("Admin"));
        assert!(ctx.can(Capability::ManageUsers));

        ctx.create(test_session("admin"));
        assert!(!ctx.can(Capability::ManageUsers));

        ctx.destroy();
        assert!(!ctx.can(Capability::ViewDashboard));
    }

    #[test]
    fn test_login_response_shape() {
        let body = r#"{"token":"abc","user":{"id":7,"name":"Ana","email":"ana@example.com","role":"Finance Manager"}}"#;
        let session: Session = serde_json::from_str(body).unwrap();
        assert_eq!(session.token, "abc");
        assert_eq!(session.user.role, Role::FinanceManager);
    }

    #[tokio::test]
    async fn test_restore_and_logout() {
        let store = MemorySessionStore::default();
        store.save(&test_session("user")).await.unwrap();

        let ctx = SessionContext::restore(&store).await.unwrap();
        assert!(ctx.is_authenticated());

        ctx.logout(&store).await.unwrap();
        assert!(!ctx.is_authenticated());
        assert_eq!(store.load().await.unwrap(), None);
    }
}
