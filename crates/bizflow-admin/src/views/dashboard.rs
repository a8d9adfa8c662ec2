//! Dashboard screen: stat cards and the staff table

use crate::app::App;
use crate::error::ViewResult;
use crate::gate::{AuthGate, Gated};
use crate::messages;
use crate::shell::Route;
use crate::state::ScreenState;
use bizflow_client::ClientError;
use bizflow_core::types::{EntityId, Order, Product, ReportData, User, UserRole};
use bizflow_query::{Query, QueryState, QueryStatus};
use std::sync::Arc;
use tracing::warn;

/// Staff table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffRow {
    /// Identifier
    pub id: EntityId,
    /// Login name
    pub username: String,
    /// Display name
    pub full_name: String,
    /// Role
    pub role: UserRole,
}

impl From<&User> for StaffRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
        }
    }
}

/// Everything the dashboard renders
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    /// Stat card figures
    pub report: ReportData,
    /// Staff table
    pub staff: Vec<StaffRow>,
}

impl DashboardData {
    /// Placeholder for an empty staff table
    pub fn empty_message(&self) -> Option<&'static str> {
        self.staff.is_empty().then_some(messages::NO_STAFF)
    }
}

fn describe(err: &ClientError) -> String {
    if err.is_forbidden() {
        messages::ACCOUNT_FORBIDDEN.to_string()
    } else {
        messages::server_or(err, messages::CONNECTION_ERROR)
    }
}

fn first_error<T>(state: &QueryState<T>) -> Option<Arc<ClientError>> {
    (state.status() == QueryStatus::Error)
        .then(|| state.error.clone())
        .flatten()
}

/// View model of the dashboard
#[derive(Debug, Clone)]
pub struct DashboardView {
    gate: AuthGate,
    users: Query<Vec<User>>,
    products: Query<Vec<Product>>,
    orders: Query<Vec<Order>>,
}

impl DashboardView {
    /// Dashboard over the shared `users`, `products-list` and `orders-all`
    ///
    /// # Errors
    ///
    /// Returns an error if one of the keys is cached with another type.
    pub fn new(app: &App) -> ViewResult<Self> {
        Ok(Self {
            gate: app.gate(),
            users: app.users_query()?,
            products: app.products_query()?,
            orders: app.orders_query()?,
        })
    }

    /// Check the gate, then load the three collections concurrently
    ///
    /// Nothing is fetched when the gate redirects.
    pub async fn mount(&self) -> Gated<()> {
        self.gate
            .guard(Route::Dashboard, || async {
                let (users, products, orders) =
                    futures::join!(self.users.load(), self.products.load(), self.orders.load());
                for err in [users.err(), products.err(), orders.err()].into_iter().flatten() {
                    warn!(error = %err, "Dashboard data failed to load");
                }
            })
            .await
    }

    /// Combined screen state
    ///
    /// Loading wins over errors, and any error wins over partial data.
    pub fn screen(&self) -> ScreenState<DashboardData> {
        let users = self.users.state();
        let products = self.products.state();
        let orders = self.orders.state();

        if users.is_loading || products.is_loading || orders.is_loading {
            return ScreenState::Loading;
        }

        let error = first_error(&users)
            .or_else(|| first_error(&products))
            .or_else(|| first_error(&orders));
        if let Some(err) = error {
            return ScreenState::Error(describe(&err));
        }

        match (users.data, products.data, orders.data) {
            (Some(users), Some(products), Some(orders)) => ScreenState::Ready(DashboardData {
                report: ReportData::aggregate(&users, &products, &orders),
                staff: users.iter().map(StaffRow::from).collect(),
            }),
            _ => ScreenState::Idle,
        }
    }
}
