//! Roles and Capabilities
//!
//! The backend hands every user a role string. The client maps each role to
//! a fixed set of capabilities here, once, and everything else asks for a
//! capability instead of comparing role strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User role as issued by the backend
///
/// Matching is exact and case-sensitive: `"admin"` is not `"Admin"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    #[default]
    User,
    Admin,
    FinanceManager,
    ProjectManager,
    /// Any role string the client does not know about
    Other(String),
}

/// Something a signed-in user may do in the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ViewDashboard,
    ManageAccounts,
    ManageInvoices,
    ManageUsers,
    ViewAuditLogs,
}

const BASE_CAPABILITIES: &[Capability] = &[
    Capability::ViewDashboard,
    Capability::ManageAccounts,
    Capability::ManageInvoices,
];

const ADMIN_CAPABILITIES: &[Capability] = &[
    Capability::ViewDashboard,
    Capability::ManageAccounts,
    Capability::ManageInvoices,
    Capability::ManageUsers,
    Capability::ViewAuditLogs,
];

impl Role {
    /// Roles offered when creating a user
    pub const ASSIGNABLE: [Role; 4] = [
        Role::User,
        Role::Admin,
        Role::FinanceManager,
        Role::ProjectManager,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Admin => "Admin",
            Role::FinanceManager => "Finance Manager",
            Role::ProjectManager => "Project Manager",
            Role::Other(s) => s,
        }
    }

    /// Capabilities granted to this role
    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            Role::Admin => ADMIN_CAPABILITIES,
            Role::User | Role::FinanceManager | Role::ProjectManager | Role::Other(_) => {
                BASE_CAPABILITIES
            }
        }
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "user" => Role::User,
            "Admin" => Role::Admin,
            "Finance Manager" => Role::FinanceManager,
            "Project Manager" => Role::ProjectManager,
            _ => Role::Other(s),
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Role::from(s.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
