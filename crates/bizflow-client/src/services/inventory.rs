//! Stock receipts and levels

use super::{Ack, validate};
use crate::error::ClientResult;
use crate::http::HttpClient;
use bizflow_core::types::{ApiResponse, EntityId, InventoryImportRequest, InventoryLevel};
use tracing::info;

/// `/v1/inventory`
#[derive(Debug, Clone)]
pub struct InventoryService {
    http: HttpClient,
}

impl InventoryService {
    /// Create the service
    pub const fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Record a stock receipt
    ///
    /// # Errors
    ///
    /// Returns an error if the quantity is not positive or the request fails.
    pub async fn import_inventory(
        &self,
        request: &InventoryImportRequest,
    ) -> ClientResult<ApiResponse<Ack>> {
        validate(request)?;
        let response = self.http.post("/api/v1/inventory/import", request).await?;
        info!(
            product_id = request.product_id,
            quantity = request.quantity,
            "Inventory imported"
        );
        Ok(response)
    }

    /// Current stock level of a product
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_inventory(&self, product_id: EntityId) -> ClientResult<ApiResponse<InventoryLevel>> {
        self.http
            .get(&format!("/api/v1/inventory/{product_id}"), &[])
            .await
    }
}
