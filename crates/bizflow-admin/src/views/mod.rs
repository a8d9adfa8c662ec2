//! Screen view models
//!
//! Each view owns its local form and filter state and reads server data
//! through the shared query cache.

pub mod account;
pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod products;

pub use account::AccountView;
pub use auth::{ForgotPasswordView, LoginView, RegisterForm, RegisterView};
pub use chat::{ChatMessage, ChatWidget, Sender};
pub use dashboard::{DashboardData, DashboardView, StaffRow};
pub use products::{Notice, ProductCatalogView, ProductForm, ProductRow, StatusFilter};
