//! Double-entry journal

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{lenient_date, Id};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalLine {
    pub account_id: Id,
    #[serde(default)]
    pub debit: Decimal,
    #[serde(default)]
    pub credit: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Id,
    #[serde(deserialize_with = "lenient_date::deserialize")]
    pub entry_date: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub lines: Vec<JournalLine>,
}

/// Body of `POST /finance/journal-entries`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewJournalEntry {
    pub entry_date: NaiveDate,
    pub description: String,
    pub lines: Vec<JournalLine>,
}

impl NewJournalEntry {
    /// Debits equal credits
    pub fn is_balanced(&self) -> bool {
        let debits: Decimal = self.lines.iter().map(|l| l.debit).sum();
        let credits: Decimal = self.lines.iter().map(|l| l.credit).sum();
        debits == credits
    }
}
