//! Routes and the navigation shell

use bizflow_client::{AuthProvider, ClientResult};
use std::fmt;
use tracing::info;

/// Screens of the admin client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Landing page
    Home,
    /// Sign in
    Login,
    /// Create an account
    Register,
    /// Password recovery
    ForgotPassword,
    /// Overview
    Dashboard,
    /// Product catalog
    Products,
    /// Orders
    Orders,
    /// Customers
    Customers,
    /// Reports
    Reports,
    /// Settings
    Settings,
    /// Current account
    Account,
}

impl Route {
    /// URL path of the route
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/auth/login",
            Self::Register => "/auth/register",
            Self::ForgotPassword => "/auth/forgot-password",
            Self::Dashboard => "/dashboard",
            Self::Products => "/dashboard/products",
            Self::Orders => "/dashboard/orders",
            Self::Customers => "/dashboard/customers",
            Self::Reports => "/dashboard/reports",
            Self::Settings => "/dashboard/settings",
            Self::Account => "/account",
        }
    }

    /// Whether the route needs a signed-in session
    pub const fn is_protected(self) -> bool {
        !matches!(
            self,
            Self::Home | Self::Login | Self::Register | Self::ForgotPassword
        )
    }

    /// Route for a path, if any matches exactly
    pub fn from_path(path: &str) -> Option<Self> {
        ALL_ROUTES.iter().copied().find(|r| r.path() == path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

const ALL_ROUTES: [Route; 11] = [
    Route::Home,
    Route::Login,
    Route::Register,
    Route::ForgotPassword,
    Route::Dashboard,
    Route::Products,
    Route::Orders,
    Route::Customers,
    Route::Reports,
    Route::Settings,
    Route::Account,
];

/// Sidebar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    /// Label
    pub title: &'static str,
    /// Target
    pub route: Route,
}

/// Sidebar entries in display order
pub const MENU: [MenuItem; 6] = [
    MenuItem {
        title: "Tổng quan",
        route: Route::Dashboard,
    },
    MenuItem {
        title: "Sản phẩm",
        route: Route::Products,
    },
    MenuItem {
        title: "Đơn hàng",
        route: Route::Orders,
    },
    MenuItem {
        title: "Khách hàng",
        route: Route::Customers,
    },
    MenuItem {
        title: "Báo cáo",
        route: Route::Reports,
    },
    MenuItem {
        title: "Cấu hình",
        route: Route::Settings,
    },
];

/// Layout around the protected screens: sidebar, header and logout
#[derive(Debug, Clone)]
pub struct Shell {
    auth: AuthProvider,
    current: String,
}

impl Shell {
    /// Shell opened on `path`
    pub fn new(auth: AuthProvider, path: impl Into<String>) -> Self {
        Self {
            auth,
            current: path.into(),
        }
    }

    /// Current path
    pub fn current_path(&self) -> &str {
        &self.current
    }

    /// Move to another route
    pub fn navigate(&mut self, route: Route) {
        self.current = route.path().to_string();
    }

    /// Sidebar entries with their active flag (exact path match)
    pub fn menu(&self) -> Vec<(MenuItem, bool)> {
        MENU.iter()
            .map(|item| (*item, item.route.path() == self.current))
            .collect()
    }

    /// Clear both tokens and go to the login screen
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted tokens cannot be removed; the
    /// in-memory session is cleared regardless.
    pub fn logout(&mut self) -> ClientResult<Route> {
        let result = self.auth.logout();
        self.navigate(Route::Login);
        info!("Navigated to login after logout");
        result.map(|()| Route::Login)
    }
}
