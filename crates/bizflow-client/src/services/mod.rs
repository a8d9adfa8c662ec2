//! Resource services, one method per backend operation
//!
//! Paths are written in the front-end proxy form (`/api/v1/...`) and pass
//! through the client's rewrite table. Every method returns the parsed
//! envelope; callers decide how to present failures.

pub mod auth;
pub mod chat;
pub mod debts;
pub mod health;
pub mod inventory;
pub mod orders;
pub mod products;
pub mod users;

pub use auth::AuthService;
pub use chat::{Assistant, CannedAssistant, ChatService};
pub use debts::DebtService;
pub use health::{HealthService, HealthStatus};
pub use inventory::InventoryService;
pub use orders::OrderService;
pub use products::ProductService;
pub use users::UserService;

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use bizflow_core::config::ApiConfig;
use bizflow_core::types::{ApiResponse, PageResponse};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Payload of endpoints whose `result` carries nothing the client reads
pub type Ack = serde::de::IgnoredAny;

/// A list result that arrives either paged or as a bare array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    /// Spring style page
    Page(PageResponse<T>),
    /// Plain JSON array
    Items(Vec<T>),
}

impl<T> Listing<T> {
    /// Items of the listing, in server order
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Page(page) => page.content,
            Self::Items(items) => items,
        }
    }

    /// Number of items carried
    pub fn len(&self) -> usize {
        match self {
            Self::Page(page) => page.content.len(),
            Self::Items(items) => items.len(),
        }
    }

    /// Whether the listing carries no items
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self::Items(Vec::new())
    }
}

/// Run local schema validation before anything is sent
pub(crate) fn validate<T: Validate>(request: &T) -> ClientResult<()> {
    request
        .validate()
        .map_err(|e| ClientError::Validation(bizflow_core::Error::from_validation(&e)))
}

/// Take the `result` out of an envelope that must carry one
///
/// # Errors
///
/// Returns [`ClientError::MissingResult`] when the envelope has no result.
pub fn require<T>(envelope: ApiResponse<T>) -> ClientResult<T> {
    envelope.result.ok_or(ClientError::MissingResult)
}

/// Every resource service over one HTTP client
#[derive(Debug, Clone)]
pub struct Services {
    /// Authentication endpoints
    pub auth: AuthService,
    /// Staff accounts
    pub users: UserService,
    /// Product catalog
    pub products: ProductService,
    /// Sales orders
    pub orders: OrderService,
    /// Stock levels and receipts
    pub inventory: InventoryService,
    /// Customer debts
    pub debts: DebtService,
    /// AI chat
    pub chat: ChatService,
    /// Backend health probe
    pub health: HealthService,
}

impl Services {
    /// Build the service bundle
    pub fn new(http: &HttpClient, config: &ApiConfig) -> Self {
        Self {
            auth: AuthService::new(http.clone()),
            users: UserService::new(http.clone()),
            products: ProductService::new(http.clone(), config.products_page_size),
            orders: OrderService::new(http.clone(), config.orders_page_size),
            inventory: InventoryService::new(http.clone()),
            debts: DebtService::new(http.clone()),
            chat: ChatService::new(http.clone()),
            health: HealthService::new(http.clone()),
        }
    }
}
