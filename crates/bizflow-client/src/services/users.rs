//! Staff accounts

use super::Listing;
use crate::error::ClientResult;
use crate::http::HttpClient;
use bizflow_core::types::{ApiResponse, User};

/// `/api/v1/users`
#[derive(Debug, Clone)]
pub struct UserService {
    http: HttpClient,
}

impl UserService {
    /// Create the service
    pub const fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// List staff accounts
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; a 403 means the caller is not
    /// an administrator.
    pub async fn list_users(&self) -> ClientResult<ApiResponse<Listing<User>>> {
        self.http.get("/api/api/v1/users", &[]).await
    }
}
