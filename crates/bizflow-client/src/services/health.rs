//! Backend health probe

use crate::error::ClientResult;
use crate::http::HttpClient;
use bizflow_core::types::ApiResponse;
use serde::{Deserialize, Serialize};

/// Health report returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Overall status, `UP` when healthy
    #[serde(default)]
    pub status: String,
    /// Service name
    #[serde(default)]
    pub service: Option<String>,
    /// Build version
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthStatus {
    /// Whether the backend reports itself as up
    pub fn is_up(&self) -> bool {
        self.status.eq_ignore_ascii_case("UP")
    }
}

/// `/v1/health`
#[derive(Debug, Clone)]
pub struct HealthService {
    http: HttpClient,
}

impl HealthService {
    /// Create the service
    pub const fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Probe the backend
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or unhealthy.
    pub async fn health(&self) -> ClientResult<ApiResponse<HealthStatus>> {
        self.http.get("/api/v1/health", &[]).await
    }
}
