//! Chart of Accounts Page
//!
//! Account list plus the "Add Account" form.

use async_trait::async_trait;

use super::{
    fetch_logged, submit_logged, FormPage, LoadScope, Outcome, Page, PageState, Slice, Submission,
};
use crate::api::finance;
use crate::client::HttpClient;
use crate::models::{Account, NewAccount};
use crate::router::Route;

pub struct AccountsPage {
    client: HttpClient,
    scope: LoadScope,
    state: PageState,
    accounts: Slice<Vec<Account>>,
    draft: NewAccount,
}

impl AccountsPage {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            scope: LoadScope::new(),
            state: PageState::Loading,
            accounts: Slice::default(),
            draft: NewAccount::default(),
        }
    }

    pub fn accounts(&self) -> &Slice<Vec<Account>> {
        &self.accounts
    }

    pub fn draft(&self) -> &NewAccount {
        &self.draft
    }

    /// Edit the draft; only meaningful while the form is open
    pub fn draft_mut(&mut self) -> &mut NewAccount {
        &mut self.draft
    }

    /// Create the drafted account, then refetch the list
    pub async fn submit(&mut self) -> Submission {
        let request = finance::create_account(&self.draft);
        let created = match self
            .scope
            .run(submit_logged(&self.client, request, "creating account"))
            .await
        {
            Some(result) => result,
            None => return Submission::Cancelled,
        };

        if let Err(e) = created {
            return Submission::Failed(e);
        }

        tracing::info!(code = %self.draft.account_code, "Account created");
        self.draft = NewAccount::default();
        self.state = PageState::Ready;

        // the record exists either way; a cancelled refetch only leaves the list stale
        if self.refresh().await == Outcome::Cancelled {
            tracing::debug!("Refetch after create cancelled");
        }
        Submission::Completed
    }

    async fn refresh(&mut self) -> Outcome {
        let fetched = self
            .scope
            .run(fetch_logged(&self.client, finance::list_accounts(), "accounts"))
            .await;

        match fetched {
            Some(result) => {
                self.accounts.apply(result);
                Outcome::Settled
            }
            None => Outcome::Cancelled,
        }
    }
}

#[async_trait]
impl Page for AccountsPage {
    fn route(&self) -> Route {
        Route::Accounts
    }

    fn state(&self) -> PageState {
        self.state
    }

    fn scope(&self) -> &LoadScope {
        &self.scope
    }

    async fn load(&mut self) -> Outcome {
        let outcome = self.refresh().await;
        if outcome == Outcome::Settled && self.state == PageState::Loading {
            self.state = PageState::Ready;
        }
        outcome
    }
}

impl FormPage for AccountsPage {
    fn state_mut(&mut self) -> &mut PageState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::models::AccountType;
    use crate::session::{test_session, SessionContext};
    use crate::testing::FakeBackend;
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::time::Duration;

    fn cash_account() -> serde_json::Value {
        json!({"id": 1, "account_code": "1000", "account_name": "Cash",
               "account_type": "Asset", "balance": 0, "currency": "USD"})
    }

    async fn mounted(backend: &FakeBackend) -> AccountsPage {
        let client = backend.client(SessionContext::with_session(test_session("user")));
        let mut page = AccountsPage::new(client);
        assert_eq!(page.state(), PageState::Loading);
        assert_eq!(page.load().await, Outcome::Settled);
        page
    }

    #[tokio::test]
    async fn test_create_account_refetches_and_collapses() {
        let backend = FakeBackend::start().await;
        backend.respond_once("GET", "/finance/accounts", 200, json!([]));
        backend.respond("POST", "/finance/accounts", 201, json!({"id": 1}));
        backend.respond("GET", "/finance/accounts", 200, json!([cash_account()]));

        let mut page = mounted(&backend).await;
        assert_eq!(page.state(), PageState::Ready);
        assert!(page.accounts().items().is_empty());

        page.open_form();
        assert_eq!(page.state(), PageState::FormOpen);
        {
            let draft = page.draft_mut();
            draft.account_code = "1000".to_string();
            draft.account_name = "Cash".to_string();
            draft.account_type = AccountType::Asset;
            draft.balance = Decimal::ZERO;
            draft.currency = "USD".to_string();
        }

        assert_eq!(page.submit().await, Submission::Completed);

        let posts = backend.requests_to("POST", "/finance/accounts");
        assert_eq!(posts.len(), 1);
        assert_eq!(
            posts[0].body,
            Some(json!({"account_code": "1000", "account_name": "Cash",
                        "account_type": "Asset", "balance": 0.0, "currency": "USD"}))
        );
        assert_eq!(posts[0].bearer.as_deref(), Some("test-token"));

        assert_eq!(backend.requests_to("GET", "/finance/accounts").len(), 2);
        assert_eq!(page.accounts().items().len(), 1);
        assert_eq!(page.accounts().items()[0].account_name, "Cash");
        assert_eq!(page.state(), PageState::Ready);
        assert_eq!(page.draft(), &NewAccount::default());
    }

    #[tokio::test]
    async fn test_failed_create_keeps_form_open() {
        let backend = FakeBackend::start().await;
        backend.respond("GET", "/finance/accounts", 200, json!([]));
        backend.respond("POST", "/finance/accounts", 400, json!({"error": "Duplicate code"}));

        let mut page = mounted(&backend).await;
        page.open_form();
        page.draft_mut().account_code = "1000".to_string();

        let outcome = page.submit().await;
        assert_eq!(
            outcome,
            Submission::Failed(crate::client::ClientError::HttpStatus {
                status: 400,
                message: "Duplicate code".to_string()
            })
        );
        assert_eq!(page.state(), PageState::FormOpen);
        assert_eq!(page.draft().account_code, "1000");
        assert_eq!(backend.requests_to("GET", "/finance/accounts").len(), 1);
    }

    #[tokio::test]
    async fn test_failed_load_still_ready() {
        let backend = FakeBackend::start().await;
        backend.respond("GET", "/finance/accounts", 500, json!({"error": "boom"}));

        let page = mounted(&backend).await;
        assert_eq!(page.state(), PageState::Ready);
        assert!(page.accounts().items().is_empty());
        assert_eq!(page.accounts().error().and_then(|e| e.status()), Some(500));
    }

    #[test]
    fn test_form_stays_closed_while_loading() {
        let client = HttpClient::new(&ApiConfig::default(), SessionContext::new()).unwrap();
        let mut page = AccountsPage::new(client);
        page.open_form();
        page.toggle_form();
        assert_eq!(page.state(), PageState::Loading);
    }

    #[tokio::test]
    async fn test_toggle_form_keeps_draft() {
        let backend = FakeBackend::start().await;
        backend.respond("GET", "/finance/accounts", 200, json!([]));

        let mut page = mounted(&backend).await;
        page.toggle_form();
        page.draft_mut().account_name = "Petty cash".to_string();
        page.toggle_form();
        assert_eq!(page.state(), PageState::Ready);
        assert_eq!(page.draft().account_name, "Petty cash");
    }

    #[tokio::test]
    async fn test_create_completes_when_refetch_cancelled() {
        let backend = FakeBackend::start().await;
        backend.respond_once("GET", "/finance/accounts", 200, json!([]));
        let mut page = mounted(&backend).await;

        backend.respond("POST", "/finance/accounts", 201, json!({"id": 1}));
        backend.respond("GET", "/finance/accounts", 200, json!([cash_account()]));
        backend.delay("GET", "/finance/accounts", Duration::from_millis(1000));

        page.open_form();
        page.draft_mut().account_code = "1000".to_string();
        let scope = page.scope().clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(150)).await;
            scope.unmount();
        });

        assert_eq!(page.submit().await, Submission::Completed);
        assert_eq!(backend.requests_to("POST", "/finance/accounts").len(), 1);
        assert!(page.accounts().items().is_empty());
        assert_eq!(page.draft(), &NewAccount::default());
    }

    // Known race: navigating away while the list is in flight.
    #[tokio::test]
    async fn test_unmount_during_load_drops_response() {
        let backend = FakeBackend::start().await;
        backend.respond("GET", "/finance/accounts", 200, json!([cash_account()]));
        backend.delay("GET", "/finance/accounts", Duration::from_millis(300));

        let client = backend.client(SessionContext::with_session(test_session("user")));
        let mut page = AccountsPage::new(client);
        let scope = page.scope().clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(30)).await;
            scope.unmount();
        });

        assert_eq!(page.load().await, Outcome::Cancelled);
        assert_eq!(page.state(), PageState::Loading);
        assert!(page.accounts().is_unset());
    }
}
