//! Vendors and customers

use serde::{Deserialize, Serialize};

use super::Id;

/// A trading counterparty; vendors and customers share a shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

pub type Vendor = Party;
pub type Customer = Party;

/// Body of `POST /vendors-customers/{vendors,customers}`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewParty {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}
