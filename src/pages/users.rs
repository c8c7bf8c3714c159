//! User Management Page
//!
//! User list, the "Add User" form and confirmed deletion.

use async_trait::async_trait;

use super::{
    fetch_logged, submit_logged, FormPage, LoadScope, Outcome, Page, PageState, Slice, Submission,
};
use crate::api::users;
use crate::client::HttpClient;
use crate::models::{Id, NewUser, User};
use crate::router::Route;

/// Prompt shown before a user is deleted
pub const DELETE_PROMPT: &str = "Are you sure?";

pub struct UsersPage {
    client: HttpClient,
    scope: LoadScope,
    state: PageState,
    users: Slice<Vec<User>>,
    draft: NewUser,
}

impl UsersPage {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            scope: LoadScope::new(),
            state: PageState::Loading,
            users: Slice::default(),
            draft: NewUser::default(),
        }
    }

    pub fn users(&self) -> &Slice<Vec<User>> {
        &self.users
    }

    pub fn draft(&self) -> &NewUser {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut NewUser {
        &mut self.draft
    }

    /// Register the drafted user, then refetch
    pub async fn submit(&mut self) -> Submission {
        let request = users::register(&self.draft);
        let created = match self
            .scope
            .run(submit_logged(&self.client, request, "creating user"))
            .await
        {
            Some(result) => result,
            None => return Submission::Cancelled,
        };

        if let Err(e) = created {
            return Submission::Failed(e);
        }

        tracing::info!(email = %self.draft.email, role = %self.draft.role, "User created");
        self.draft = NewUser::default();
        self.state = PageState::Ready;
        self.refetch_outcome().await
    }

    /// Delete a user once `confirm` agrees, then refetch
    ///
    /// `confirm` receives [`DELETE_PROMPT`]; returning false sends nothing.
    pub async fn delete(&mut self, id: Id, confirm: impl FnOnce(&str) -> bool) -> Submission {
        if !confirm(DELETE_PROMPT) {
            return Submission::Declined;
        }

        let deleted = match self
            .scope
            .run(submit_logged(&self.client, Ok(users::delete(id)), "deleting user"))
            .await
        {
            Some(result) => result,
            None => return Submission::Cancelled,
        };

        if let Err(e) = deleted {
            return Submission::Failed(e);
        }

        tracing::info!(user_id = id, "User deleted");
        self.refetch_outcome().await
    }

    /// The mutation already landed, so a cancelled refetch still counts as done
    async fn refetch_outcome(&mut self) -> Submission {
        if self.refresh().await == Outcome::Cancelled {
            tracing::debug!("Refetch of users cancelled");
        }
        Submission::Completed
    }

    async fn refresh(&mut self) -> Outcome {
        let fetched = self
            .scope
            .run(fetch_logged(&self.client, users::list(), "users"))
            .await;

        match fetched {
            Some(result) => {
                self.users.apply(result);
                Outcome::Settled
            }
            None => Outcome::Cancelled,
        }
    }
}

#[async_trait]
impl Page for UsersPage {
    fn route(&self) -> Route {
        Route::Users
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

impl FormPage for UsersPage {
    fn state_mut(&mut self) -> &mut PageState {
        &mut self.state
    }
}
