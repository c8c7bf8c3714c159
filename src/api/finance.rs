//! `/finance/accounts` and `/finance/journal-entries`

use crate::client::{segment, ApiRequest, ClientResult};
use crate::models::{Id, NewAccount, NewJournalEntry};

pub fn list_accounts() -> ApiRequest {
    ApiRequest::get("/finance/accounts")
}

pub fn get_account(id: Id) -> ApiRequest {
    ApiRequest::get(format!("/finance/accounts/{}", segment(id)))
}

pub fn create_account(account: &NewAccount) -> ClientResult<ApiRequest> {
    ApiRequest::post("/finance/accounts").json(account)
}

pub fn update_account(id: Id, account: &NewAccount) -> ClientResult<ApiRequest> {
    ApiRequest::put(format!("/finance/accounts/{}", segment(id))).json(account)
}

pub fn delete_account(id: Id) -> ApiRequest {
    ApiRequest::delete(format!("/finance/accounts/{}", segment(id)))
}

pub fn list_journal_entries() -> ApiRequest {
    ApiRequest::get("/finance/journal-entries")
}

pub fn get_journal_entry(id: Id) -> ApiRequest {
    ApiRequest::get(format!("/finance/journal-entries/{}", segment(id)))
}

pub fn create_journal_entry(entry: &NewJournalEntry) -> ClientResult<ApiRequest> {
    ApiRequest::post("/finance/journal-entries").json(entry)
}

/// Approval carries no body
pub fn approve_journal_entry(id: Id) -> ApiRequest {
    ApiRequest::post(format!("/finance/journal-entries/{}/approve", segment(id)))
}
