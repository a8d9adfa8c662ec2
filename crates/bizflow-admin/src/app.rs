//! Application context shared by every screen

use crate::error::ViewResult;
use crate::gate::AuthGate;
use bizflow_client::services::Assistant;
use bizflow_client::{AuthProvider, FileTokenStore, HttpClient, Services, Session, TokenStore};
use bizflow_core::Config;
use bizflow_core::types::{Order, Product, User};
use bizflow_query::{Query, QueryClient, QueryKey};
use std::sync::Arc;
use tracing::info;

/// Cache keys of the shared listings
pub mod keys {
    use bizflow_query::QueryKey;

    /// Staff accounts
    pub const USERS: QueryKey = QueryKey::from_static("users");
    /// Product catalog
    pub const PRODUCTS_LIST: QueryKey = QueryKey::from_static("products-list");
    /// Recent orders
    pub const ORDERS_ALL: QueryKey = QueryKey::from_static("orders-all");
}

/// Configuration, session, services and cache wired together
#[derive(Debug, Clone)]
pub struct App {
    /// Loaded configuration
    pub config: Config,
    /// Session read by the HTTP client
    pub session: Session,
    /// Resource services
    pub services: Services,
    /// Owner of session changes
    pub auth: AuthProvider,
    /// Shared query cache
    pub cache: QueryClient,
}

impl App {
    /// Build the context around an explicit token store
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: Config, store: Arc<dyn TokenStore>) -> ViewResult<Self> {
        let session = Session::new();
        let http = HttpClient::new(&config.api, session.clone())?;
        let services = Services::new(&http, &config.api);
        let auth = AuthProvider::new(services.auth.clone(), session.clone(), store);

        Ok(Self {
            config,
            session,
            services,
            auth,
            cache: QueryClient::new(),
        })
    }

    /// Build the context with the configured token file and restore the session
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the token file
    /// is unreadable.
    pub fn open(config: Config) -> ViewResult<Self> {
        let store = Arc::new(FileTokenStore::new(config.session.token_file.clone()));
        let app = Self::new(config, store)?;
        let restored = app.auth.restore()?;
        info!(
            base_url = %app.config.api.base_url,
            signed_in = restored,
            "Application context ready"
        );
        Ok(app)
    }

    /// Gate over this session
    pub fn gate(&self) -> AuthGate {
        AuthGate::new(self.session.clone())
    }

    /// Backend chat assistant
    pub fn assistant(&self) -> Arc<dyn Assistant> {
        Arc::new(self.services.chat.clone())
    }

    /// Cached product catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the key is registered with another type.
    pub fn products_query(&self) -> ViewResult<Query<Vec<Product>>> {
        let service = self.services.products.clone();
        Ok(self.cache.query(keys::PRODUCTS_LIST, move || {
            let service = service.clone();
            async move {
                Ok(service
                    .list_products()
                    .await?
                    .result
                    .map(|page| page.content)
                    .unwrap_or_default())
            }
        })?)
    }

    /// Cached staff list
    ///
    /// # Errors
    ///
    /// Returns an error if the key is registered with another type.
    pub fn users_query(&self) -> ViewResult<Query<Vec<User>>> {
        let service = self.services.users.clone();
        Ok(self.cache.query(keys::USERS, move || {
            let service = service.clone();
            async move {
                Ok(service
                    .list_users()
                    .await?
                    .result
                    .map(bizflow_client::Listing::into_items)
                    .unwrap_or_default())
            }
        })?)
    }

    /// Cached recent orders
    ///
    /// # Errors
    ///
    /// Returns an error if the key is registered with another type.
    pub fn orders_query(&self) -> ViewResult<Query<Vec<Order>>> {
        let service = self.services.orders.clone();
        Ok(self.cache.query(keys::ORDERS_ALL, move || {
            let service = service.clone();
            async move {
                Ok(service
                    .list_orders()
                    .await?
                    .result
                    .map(|page| page.content)
                    .unwrap_or_default())
            }
        })?)
    }

    /// Keys currently cached
    pub fn cached_keys(&self) -> Vec<QueryKey> {
        self.cache.keys()
    }
}
