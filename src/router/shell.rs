//! Application shell
//!
//! Navigation chrome around every protected page: brand, signed-in user,
//! menu and logout.

use std::sync::Arc;

use super::Route;
use crate::session::{SessionContext, SessionStore};

pub const BRAND: &str = "ERP Finance";

/// Menu order
const MENU: [Route; 5] = [
    Route::Dashboard,
    Route::Accounts,
    Route::Invoices,
    Route::Users,
    Route::AuditLogs,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub route: Route,
}

pub struct Shell {
    session: SessionContext,
    store: Arc<dyn SessionStore>,
    sidebar_open: bool,
}

impl Shell {
    pub fn new(session: SessionContext, store: Arc<dyn SessionStore>) -> Self {
        Self {
            session,
            store,
            sidebar_open: true,
        }
    }

    /// Display name of the signed-in user
    pub fn user_name(&self) -> Option<String> {
        self.session.user().map(|u| u.name)
    }

    /// Menu entries the current role may see
    pub fn nav_links(&self) -> Vec<NavLink> {
        MENU.into_iter()
            .filter(|route| route.capability().is_some_and(|c| self.session.can(c)))
            .map(|route| NavLink {
                label: route.title(),
                route,
            })
            .collect()
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    /// Destroy the session and clear storage; always lands on the login route
    pub async fn logout(&self) -> Route {
        if let Err(e) = self.session.logout(self.store.as_ref()).await {
            tracing::warn!(error = %e, "Failed to clear stored session");
        }
        Route::Login
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::{guard, Navigation};
    use crate::session::{test_session, MemorySessionStore};

    fn shell_for(role: &str) -> Shell {
        Shell::new(
            SessionContext::with_session(test_session(role)),
            Arc::new(MemorySessionStore::default()),
        )
    }

    fn labels(shell: &Shell) -> Vec<&'static str> {
        shell.nav_links().into_iter().map(|l| l.label).collect()
    }

    #[test]
    fn test_admin_links_for_admin_only() {
        assert_eq!(
            labels(&shell_for("Admin")),
            vec!["Dashboard", "Chart of Accounts", "Invoices", "User Management", "Audit Logs"]
        );

        for role in ["user", "Finance Manager", "Project Manager", "admin", "ADMIN", ""] {
            assert_eq!(
                labels(&shell_for(role)),
                vec!["Dashboard", "Chart of Accounts", "Invoices"],
                "role {:?}",
                role
            );
        }
    }

    #[test]
    fn test_sidebar_toggle() {
        let mut shell = shell_for("user");
        assert!(shell.sidebar_open());
        shell.toggle_sidebar();
        assert!(!shell.sidebar_open());
    }

    #[tokio::test]
    async fn test_logout() {
        let session = SessionContext::with_session(test_session("Admin"));
        let store = Arc::new(MemorySessionStore::default());
        store.save(&test_session("Admin")).await.unwrap();

        let shell = Shell::new(session.clone(), store.clone());
        assert_eq!(shell.user_name().as_deref(), Some("Test User"));

        assert_eq!(shell.logout().await, Route::Login);
        assert!(!session.is_authenticated());
        assert_eq!(store.load().await.unwrap(), None);
        assert_eq!(guard(Route::Dashboard, &session), Navigation::Redirect(Route::Login));
    }
}
