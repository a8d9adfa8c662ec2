//! Sales orders

use crate::error::ClientResult;
use crate::http::HttpClient;
use bizflow_core::types::{ApiResponse, Order, PageResponse};

/// `/v1/orders`
#[derive(Debug, Clone)]
pub struct OrderService {
    http: HttpClient,
    page_size: u32,
}

impl OrderService {
    /// Create the service, listing `page_size` orders per request
    pub const fn new(http: HttpClient, page_size: u32) -> Self {
        Self { http, page_size }
    }

    /// Fetch the most recent page of orders
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_orders(&self) -> ClientResult<ApiResponse<PageResponse<Order>>> {
        self.http
            .get("/api/v1/orders", &[("size", self.page_size.to_string())])
            .await
    }
}
