//! Client-side authentication gate
//!
//! Protected screens ask the gate before fetching anything. The backend
//! enforces authorization on its own; this only avoids pointless requests.

use crate::shell::Route;
use bizflow_client::Session;
use std::future::Future;
use tracing::debug;

/// Outcome of a gate check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Session holds a token, or the route is public
    Allow,
    /// Go here instead
    Redirect(Route),
}

/// Result of a guarded load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gated<T> {
    /// The gate redirected; the load never ran
    Redirect(Route),
    /// The load ran
    Pass(T),
}

/// Checks the session for an access token
#[derive(Debug, Clone)]
pub struct AuthGate {
    session: Session,
}

impl AuthGate {
    /// Gate over `session`
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// Decide whether `route` may be shown
    pub fn check(&self, route: Route) -> GateDecision {
        if !route.is_protected() || self.session.is_authenticated() {
            GateDecision::Allow
        } else {
            debug!(route = %route, "No access token, redirecting to login");
            GateDecision::Redirect(Route::Login)
        }
    }

    /// Run `load` only if the gate allows `route`
    pub async fn guard<T, F, Fut>(&self, route: Route, load: F) -> Gated<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        match self.check(route) {
            GateDecision::Allow => Gated::Pass(load().await),
            GateDecision::Redirect(target) => Gated::Redirect(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizflow_client::Tokens;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn test_guard_skips_load_without_token() {
        let gate = AuthGate::new(Session::new());
        let ran = &AtomicBool::new(false);

        let outcome = gate
            .guard(Route::Dashboard, || async move {
                ran.store(true, Ordering::SeqCst);
            })
            .await;

        assert_eq!(outcome, Gated::Redirect(Route::Login));
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_guard_runs_load_with_token() {
        let gate = AuthGate::new(Session::with_tokens(Tokens::new("t", None)));

        let outcome = gate.guard(Route::Products, || async { 42 }).await;

        assert_eq!(outcome, Gated::Pass(42));
    }

    #[test]
    fn test_public_routes_always_allowed() {
        let gate = AuthGate::new(Session::new());
        assert_eq!(gate.check(Route::Login), GateDecision::Allow);
        assert_eq!(gate.check(Route::Register), GateDecision::Allow);
    }
}
