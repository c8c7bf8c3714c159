//! Page View-Models
//!
//! One view-model per screen. Every page follows the same shape:
//!
//! 1. **Loading**: on mount, issue the page's fetches concurrently and wait
//!    for all of them to settle
//! 2. **Ready**: lists are populated; each fetched slice keeps its own error
//! 3. **FormOpen**: pages with a create form edit a local draft; a successful
//!    submit refetches the list, collapses the form and resets the draft
//!
//! Backend failures never panic and never block the page. They are logged
//! and recorded on the slice or returned as a [`Submission`] so callers and
//! tests can see them.
//!
//! Each page owns a [`LoadScope`]. Unmounting the page cancels the scope;
//! a fetch or submit still in flight then resolves to `Cancelled` and its
//! response is dropped without touching page state.

mod accounts;
mod audit_logs;
mod auth;
mod dashboard;
mod invoices;
mod users;

pub use accounts::AccountsPage;
pub use audit_logs::{AuditLogsPage, Pagination};
pub use auth::{LoginPage, RegisterPage};
pub use dashboard::DashboardPage;
pub use invoices::{InvoicesPage, ItemEdit};
pub use users::UsersPage;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

use crate::client::{ApiRequest, ClientError, ClientResult, HttpClient};
use crate::router::Route;

/// Where a page is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Loading,
    Ready,
    FormOpen,
}

/// How a load settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// All fetches finished, successfully or not
    Settled,
    /// The page was unmounted first; nothing was applied
    Cancelled,
}

/// Result of a mutating call (create, delete, sign-in)
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Completed,
    Failed(ClientError),
    /// The user did not confirm
    Declined,
    Cancelled,
}

impl Submission {
    pub fn is_completed(&self) -> bool {
        matches!(self, Submission::Completed)
    }
}

/// One piece of fetched state
///
/// Holds the last successfully fetched value and the error from the most
/// recent attempt, if it failed. A failed refetch keeps the stale value.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice<T> {
    value: Option<T>,
    error: Option<ClientError>,
}

impl<T> Default for Slice<T> {
    fn default() -> Self {
        Self {
            value: None,
            error: None,
        }
    }
}

impl<T> Slice<T> {
    /// Record the result of a fetch
    pub fn apply(&mut self, result: ClientResult<T>) {
        match result {
            Ok(value) => {
                self.value = Some(value);
                self.error = None;
            }
            Err(e) => self.error = Some(e),
        }
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn error(&self) -> Option<&ClientError> {
        self.error.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.value.is_some()
    }

    /// Never fetched successfully
    pub fn is_unset(&self) -> bool {
        self.value.is_none()
    }
}

impl<T> Slice<Vec<T>> {
    /// Items, or an empty list when nothing has loaded
    pub fn items(&self) -> &[T] {
        self.value.as_deref().unwrap_or(&[])
    }
}

/// Cancellation scope for one page mount
#[derive(Debug, Clone)]
pub struct LoadScope {
    cancelled: Arc<watch::Sender<bool>>,
}

impl Default for LoadScope {
    fn default() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            cancelled: Arc::new(tx),
        }
    }
}

impl LoadScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel everything running in this scope
    pub fn unmount(&self) {
        self.cancelled.send_replace(true);
    }

    pub fn is_active(&self) -> bool {
        !*self.cancelled.borrow()
    }

    /// Resolves once the scope is unmounted
    pub async fn cancelled(&self) {
        let mut rx = self.cancelled.subscribe();
        // The sender lives as long as `self`, so `changed` cannot fail here
        while !*rx.borrow_and_update() {
            if rx.changed().await.is_err() {
                return;
            }
        }
    }

    /// Run `fut` unless the scope is unmounted first
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        if !self.is_active() {
            return None;
        }
        tokio::select! {
            biased;
            _ = self.cancelled() => None,
            out = fut => Some(out),
        }
    }
}

/// Behavior shared by every data page
#[async_trait]
pub trait Page: Send {
    /// Route this page is mounted at
    fn route(&self) -> Route;

    fn state(&self) -> PageState;

    fn scope(&self) -> &LoadScope;

    /// Fetch everything the page shows
    async fn load(&mut self) -> Outcome;

    /// Navigate away; in-flight work is dropped
    fn unmount(&self) {
        self.scope().unmount();
    }
}

/// A page with a collapsible create form
///
/// The form only opens from `Ready`; closing it keeps the draft.
pub trait FormPage: Page {
    fn state_mut(&mut self) -> &mut PageState;

    fn open_form(&mut self) {
        if self.state() == PageState::Ready {
            *self.state_mut() = PageState::FormOpen;
        }
    }

    fn close_form(&mut self) {
        if self.state() == PageState::FormOpen {
            *self.state_mut() = PageState::Ready;
        }
    }

    fn toggle_form(&mut self) {
        match self.state() {
            PageState::Ready => self.open_form(),
            PageState::FormOpen => self.close_form(),
            PageState::Loading => {}
        }
    }
}

/// Fetch and decode, logging failures
pub(crate) async fn fetch_logged<T: DeserializeOwned>(
    client: &HttpClient,
    request: ApiRequest,
    what: &str,
) -> ClientResult<T> {
    let result = client.fetch(&request).await;
    if let Err(e) = &result {
        tracing::warn!(error = %e, request = %request, "Error fetching {}", what);
    }
    result
}

/// Send a mutating request, logging failures
pub(crate) async fn submit_logged(
    client: &HttpClient,
    request: ClientResult<ApiRequest>,
    what: &str,
) -> ClientResult<()> {
    let result = match request {
        Ok(request) => client.execute(&request).await,
        Err(e) => Err(e),
    };
    if let Err(e) = &result {
        tracing::warn!(error = %e, "Error {}", what);
    }
    result
}
