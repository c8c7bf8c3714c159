//! Audit Logs Page
//!
//! Read-only, offset/limit paginated view of the audit trail.

use async_trait::async_trait;

use super::{fetch_logged, LoadScope, Outcome, Page, PageState, Slice};
use crate::api::admin::{self, AuditQuery};
use crate::client::HttpClient;
use crate::models::{AuditLogEntry, AuditLogPage};
use crate::router::Route;

/// Default rows per page
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Offset/limit cursor
///
/// `offset` only ever moves by `limit` and never below zero, so it stays a
/// non-negative multiple of `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    limit: u32,
    offset: u64,
    total: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// Start at the first page; a zero limit is treated as one
    pub fn new(limit: u32) -> Self {
        Self {
            limit: limit.max(1),
            offset: 0,
            total: 0,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn set_total(&mut self, total: u64) {
        self.total = total;
    }

    /// "Previous" is enabled
    pub fn has_previous(&self) -> bool {
        self.offset != 0
    }

    /// "Next" is enabled
    pub fn has_next(&self) -> bool {
        self.offset + u64::from(self.limit) < self.total
    }

    /// Step back one page; false when already at the start
    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.offset = self.offset.saturating_sub(u64::from(self.limit));
        true
    }

    /// Step forward one page; false when already at the end
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.offset += u64::from(self.limit);
        true
    }

    /// 1-based page number
    pub fn page_number(&self) -> u64 {
        self.offset / u64::from(self.limit) + 1
    }

    pub fn query(&self) -> AuditQuery {
        AuditQuery {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

pub struct AuditLogsPage {
    client: HttpClient,
    scope: LoadScope,
    state: PageState,
    logs: Slice<Vec<AuditLogEntry>>,
    pagination: Pagination,
}

impl AuditLogsPage {
    pub fn new(client: HttpClient) -> Self {
        Self::with_page_size(client, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(client: HttpClient, limit: u32) -> Self {
        Self {
            client,
            scope: LoadScope::new(),
            state: PageState::Loading,
            logs: Slice::default(),
            pagination: Pagination::new(limit),
        }
    }

    pub fn logs(&self) -> &Slice<Vec<AuditLogEntry>> {
        &self.logs
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Move to the next page and fetch it; `None` when "Next" is disabled
    pub async fn next_page(&mut self) -> Option<Outcome> {
        if !self.pagination.next() {
            return None;
        }
        Some(self.load().await)
    }

    /// Move to the previous page and fetch it; `None` when "Previous" is disabled
    pub async fn previous_page(&mut self) -> Option<Outcome> {
        if !self.pagination.previous() {
            return None;
        }
        Some(self.load().await)
    }

    /// Jump to a 1-based page, clamped to the first page
    pub async fn go_to_page(&mut self, page: u64) -> Outcome {
        let target = page.max(1);
        while self.pagination.page_number() < target && self.pagination.next() {}
        while self.pagination.page_number() > target && self.pagination.previous() {}
        self.load().await
    }
}

#[async_trait]
impl Page for AuditLogsPage {
    fn route(&self) -> Route {
        Route::AuditLogs
    }

    fn state(&self) -> PageState {
        self.state
    }

    fn scope(&self) -> &LoadScope {
        &self.scope
    }

    async fn load(&mut self) -> Outcome {
        let request = admin::audit_logs(self.pagination.query());
        let fetched = self
            .scope
            .run(fetch_logged::<AuditLogPage>(&self.client, request, "audit logs"))
            .await;

        let Some(result) = fetched else {
            return Outcome::Cancelled;
        };

        match result {
            Ok(page) => {
                self.pagination.set_total(page.total);
                self.logs.apply(Ok(page.logs));
            }
            Err(e) => self.logs.apply(Err(e)),
        }
        self.state = PageState::Ready;
        Outcome::Settled
    }
}
