//! Customer debts

use super::{Ack, Listing, validate};
use crate::error::ClientResult;
use crate::http::HttpClient;
use bizflow_core::types::{ApiResponse, DebtPaymentRequest, DebtReport, EntityId};
use tracing::info;

/// `/v1/debts`
#[derive(Debug, Clone)]
pub struct DebtService {
    http: HttpClient,
}

impl DebtService {
    /// Create the service
    pub const fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Outstanding debts
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_debts(&self) -> ClientResult<ApiResponse<Listing<DebtReport>>> {
        self.http.get("/api/v1/debts", &[]).await
    }

    /// Record a repayment against a debt
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not positive or the request fails.
    pub async fn pay_debt(
        &self,
        id: EntityId,
        request: &DebtPaymentRequest,
    ) -> ClientResult<ApiResponse<Ack>> {
        validate(request)?;
        let response = self
            .http
            .post(&format!("/api/v1/debts/{id}/pay"), request)
            .await?;
        info!(id, amount = %request.amount, "Debt payment recorded");
        Ok(response)
    }
}
