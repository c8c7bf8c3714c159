//! Audit trail entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: Id,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub user_name: Option<String>,
    pub action: String,
    pub entity_type: String,
    #[serde(default)]
    pub entity_id: Option<Id>,
    #[serde(default)]
    pub ip_address: Option<String>,
}

impl AuditLogEntry {
    /// Who did it; entries without a user were written by the system
    pub fn actor(&self) -> &str {
        self.user_name.as_deref().unwrap_or("System")
    }
}

/// Response of `GET /admin/audit-logs`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AuditLogPage {
    #[serde(default)]
    pub logs: Vec<AuditLogEntry>,
    #[serde(default)]
    pub total: u64,
}

/// Body of `POST /admin/audit-logs`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAuditLog {
    pub action: String,
    pub entity_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_actor() {
        let page: AuditLogPage = serde_json::from_str(
            r#"{"logs":[{"id":1,"created_at":"2024-02-01T09:30:00Z","user_name":null,
                "action":"CREATE","entity_type":"invoice","entity_id":12,"ip_address":"10.0.0.1"}],
                "total":1}"#,
        )
        .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.logs[0].actor(), "System");
    }
}
