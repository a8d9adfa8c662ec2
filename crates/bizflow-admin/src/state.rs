//! Per-screen state machine

use bizflow_client::ClientError;
use bizflow_query::{QueryState, QueryStatus};

/// What a screen shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenState<T> {
    /// Nothing requested yet
    Idle,
    /// Waiting for the backend
    Loading,
    /// Terminal failure, with the message to show
    Error(String),
    /// Content available
    Ready(T),
}

impl<T> Default for ScreenState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> ScreenState<T> {
    /// Derive a screen state from a query snapshot
    ///
    /// `present` builds the screen content from the cached data and `describe`
    /// turns a fetch error into the message to show.
    pub fn from_query<U>(
        state: &QueryState<U>,
        present: impl FnOnce(&U) -> T,
        describe: impl FnOnce(&ClientError) -> String,
    ) -> Self {
        match state.status() {
            QueryStatus::Idle => Self::Idle,
            QueryStatus::Loading => Self::Loading,
            QueryStatus::Error => state
                .error
                .as_deref()
                .map_or(Self::Idle, |err| Self::Error(describe(err))),
            QueryStatus::Ready => state.data.as_ref().map_or(Self::Idle, |d| Self::Ready(present(d))),
        }
    }

    /// Whether the screen is waiting
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Content, when ready
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    /// Error message, when failed
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}
