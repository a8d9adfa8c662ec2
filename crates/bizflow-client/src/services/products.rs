//! Product catalog

use super::{Ack, validate};
use crate::error::ClientResult;
use crate::http::HttpClient;
use bizflow_core::types::{ApiResponse, EntityId, PageResponse, Product, ProductPayload};
use tracing::info;

/// `/v1/products`
#[derive(Debug, Clone)]
pub struct ProductService {
    http: HttpClient,
    page_size: u32,
}

impl ProductService {
    /// Create the service, listing `page_size` products per request
    pub const fn new(http: HttpClient, page_size: u32) -> Self {
        Self { http, page_size }
    }

    /// Fetch the catalog (a single page of `page_size` items)
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_products(&self) -> ClientResult<ApiResponse<PageResponse<Product>>> {
        self.http
            .get("/api/v1/products", &[("size", self.page_size.to_string())])
            .await
    }

    /// Fetch one product
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_product(&self, id: EntityId) -> ClientResult<ApiResponse<Product>> {
        self.http.get(&format!("/api/v1/products/{id}"), &[]).await
    }

    /// Create a product
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the backend rejects the record.
    pub async fn create_product(&self, payload: &ProductPayload) -> ClientResult<ApiResponse<Product>> {
        validate(payload)?;
        let response = self.http.post("/api/v1/products", payload).await?;
        info!(sku = %payload.sku, "Product created");
        Ok(response)
    }

    /// Replace a product record
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the backend rejects the record.
    pub async fn update_product(
        &self,
        id: EntityId,
        payload: &ProductPayload,
    ) -> ClientResult<ApiResponse<Product>> {
        validate(payload)?;
        let response = self
            .http
            .put(&format!("/api/v1/products/{id}"), payload)
            .await?;
        info!(id, sku = %payload.sku, "Product updated");
        Ok(response)
    }

    /// Delete a product
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, e.g. when orders still reference
    /// the product.
    pub async fn delete_product(&self, id: EntityId) -> ClientResult<ApiResponse<Ack>> {
        let response = self.http.delete(&format!("/api/v1/products/{id}")).await?;
        info!(id, "Product deleted");
        Ok(response)
    }
}
