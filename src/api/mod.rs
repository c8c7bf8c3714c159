//! Resource API Modules
//!
//! One namespace per backend resource. Each function maps its arguments to
//! an [`ApiRequest`](crate::client::ApiRequest): verb, path with encoded path
//! parameters, query and body. Nothing here validates, transforms or
//! translates errors; the modules exist so endpoint paths live in one place.
//!
//! | Module | Resource |
//! |---|---|
//! | [`users`] | `/users` (auth + user management) |
//! | [`finance`] | `/finance/accounts`, `/finance/journal-entries` |
//! | [`invoices`] | `/invoices` |
//! | [`parties`] | `/vendors-customers` |
//! | [`projects`] | `/projects` |
//! | [`insights`] | `/insights` |
//! | [`dashboard`] | `/dashboard` |
//! | [`admin`] | `/admin/audit-logs` |

pub mod admin;
pub mod dashboard;
pub mod finance;
pub mod insights;
pub mod invoices;
pub mod parties;
pub mod projects;
pub mod users;
