//! `/admin/audit-logs`

use crate::client::{ApiRequest, ClientResult};
use crate::models::NewAuditLog;

/// Offset/limit window into the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditQuery {
    pub limit: u32,
    pub offset: u64,
}

impl Default for AuditQuery {
    fn default() -> Self {
        Self {
            limit: 100,
            offset: 0,
        }
    }
}

pub fn audit_logs(query: AuditQuery) -> ApiRequest {
    ApiRequest::get("/admin/audit-logs")
        .query("limit", query.limit)
        .query("offset", query.offset)
}

pub fn create_audit_log(entry: &NewAuditLog) -> ClientResult<ApiRequest> {
    ApiRequest::post("/admin/audit-logs").json(entry)
}
