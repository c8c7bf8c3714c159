//! Domain Models
//!
//! Entities as the client sees them. The backend owns the authoritative
//! copies; every list a page holds is replaced wholesale after a mutation.

mod account;
mod audit;
mod dashboard;
mod invoice;
mod journal;
mod party;
mod project;
mod user;

pub use account::{Account, AccountType, NewAccount};
pub use audit::{AuditLogEntry, AuditLogPage, NewAuditLog};
pub use dashboard::{Alert, CashFlowPoint, Insight, Kpis};
pub use invoice::{Invoice, InvoiceStatusUpdate, InvoiceType, LineItem, NewInvoice, PaymentRecord};
pub use journal::{JournalEntry, JournalLine, NewJournalEntry};
pub use party::{Customer, NewParty, Party, Vendor};
pub use project::{NewProject, Project, ProgressUpdate};
pub use user::{Credentials, NewUser, Registration, User, UserUpdate};

/// Backend entity identifier
pub type Id = i64;

/// Dates arrive either as `YYYY-MM-DD` or as full RFC 3339 timestamps
pub(crate) mod lenient_date {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer};

    pub fn parse(s: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
            .or_else(|| s.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(d)?;
        parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", s)))
    }

    pub mod option {
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer};

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
            match Option::<String>::deserialize(d)? {
                None => Ok(None),
                Some(s) if s.is_empty() => Ok(None),
                Some(s) => super::parse(&s)
                    .map(Some)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", s))),
            }
        }
    }

}
