//! Account screen

use crate::app::App;
use crate::error::ViewResult;
use crate::gate::{AuthGate, Gated};
use crate::messages;
use crate::shell::Route;
use crate::state::ScreenState;
use bizflow_core::types::User;
use bizflow_query::{Query, QueryError};

/// Shows the first account returned by the users endpoint
#[derive(Debug, Clone)]
pub struct AccountView {
    gate: AuthGate,
    users: Query<Vec<User>>,
    state: ScreenState<User>,
}

impl AccountView {
    /// Account screen over the shared `users` entry
    ///
    /// # Errors
    ///
    /// Returns an error if `users` is cached with another type.
    pub fn new(app: &App) -> ViewResult<Self> {
        Ok(Self {
            gate: app.gate(),
            users: app.users_query()?,
            state: ScreenState::Idle,
        })
    }

    /// Check the gate and fetch the users list
    pub async fn mount(&mut self) -> Gated<()> {
        let outcome = self
            .gate
            .guard(Route::Account, || self.users.fetch())
            .await;

        match outcome {
            Gated::Redirect(route) => Gated::Redirect(route),
            Gated::Pass(result) => {
                self.state = present(result);
                Gated::Pass(())
            }
        }
    }

    /// Current state
    pub const fn screen(&self) -> &ScreenState<User> {
        &self.state
    }
}

fn present(result: Result<Vec<User>, QueryError>) -> ScreenState<User> {
    match result {
        Ok(users) => users
            .into_iter()
            .next()
            .map_or_else(|| ScreenState::Error(messages::ACCOUNT_EMPTY.to_string()), ScreenState::Ready),
        Err(err) if err.client_error().is_some_and(|e| e.is_forbidden()) => {
            ScreenState::Error(messages::ACCOUNT_FORBIDDEN.to_string())
        }
        Err(_) => ScreenState::Error(messages::CONNECTION_ERROR.to_string()),
    }
}
