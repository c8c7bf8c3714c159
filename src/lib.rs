//! # LedgerDesk
//!
//! Client and view-model layer for the ERP finance backend: login, dashboard
//! KPIs, chart of accounts, invoices, user management and audit logs.
//!
//! ## Data Flow
//!
//! page view-model → resource API module → [`HttpClient`] → backend.
//! Responses come back and replace the page's list state wholesale.
//!
//! ## Modules
//!
//! - [`client`]: shared HTTP client with bearer-token injection
//! - [`api`]: one namespace per backend resource, mapping calls to requests
//! - [`models`]: typed entities
//! - [`session`]: explicit session context and its persistence
//! - [`access`]: role → capability table
//! - [`router`]: route table, session guard and shell
//! - [`pages`]: per-screen view-models
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ledgerdesk::pages::{DashboardPage, LoginPage, Page};
//! use ledgerdesk::{ApiConfig, FileSessionStore, HttpClient, SessionContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(FileSessionStore::new("/tmp/ledgerdesk-session.json"));
//!     let session = SessionContext::restore(store.as_ref()).await?;
//!     let client = HttpClient::new(&ApiConfig::default(), session.clone())?;
//!
//!     if !session.is_authenticated() {
//!         let mut login = LoginPage::new(client.clone(), store.clone());
//!         login.draft_mut().email = "admin@example.com".to_string();
//!         login.draft_mut().password = "secret".to_string();
//!         login.submit().await;
//!     }
//!
//!     let mut dashboard = DashboardPage::new(client);
//!     dashboard.load().await;
//!     println!("Cash balance: {}", dashboard.kpi_values().cash_balance);
//!
//!     Ok(())
//! }
//! ```

pub mod access;
pub mod api;
pub mod client;
pub mod config;
pub mod models;
pub mod pages;
pub mod router;
pub mod session;

#[cfg(test)]
mod testing;

pub use access::{Capability, Role};

pub use client::{ApiRequest, ApiResponse, ClientError, ClientResult, HttpClient, Method};

pub use config::{generate_default_config, ApiConfig, Config, ConfigError, LoggingConfig};

pub use pages::{FormPage, LoadScope, Outcome, Page, PageState, Slice, Submission};

pub use router::{guard, resolve, Navigation, Route, Shell};

pub use session::{
    FileSessionStore, MemorySessionStore, Session, SessionContext, SessionError, SessionStore,
    SessionUser,
};
