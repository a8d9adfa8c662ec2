//! Authentication endpoints

use super::{Ack, validate};
use crate::error::ClientResult;
use crate::http::HttpClient;
use bizflow_core::types::{
    ApiResponse, ForgotPasswordRequest, LoginRequest, LoginResponse, RefreshRequest,
    RegisterRequest, User,
};

/// `/v1/auth/*`
#[derive(Debug, Clone)]
pub struct AuthService {
    http: HttpClient,
}

impl AuthService {
    /// Create the service
    pub const fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Exchange credentials for a token pair
    ///
    /// This does not touch the session; use [`crate::AuthProvider::login`]
    /// to sign in.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the backend rejects the request.
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<ApiResponse<LoginResponse>> {
        validate(request)?;
        self.http.post("/api/v1/auth/login", request).await
    }

    /// Create an account
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the backend rejects the request.
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<ApiResponse<Ack>> {
        validate(request)?;
        self.http.post("/api/v1/auth/register", request).await
    }

    /// Ask the backend to mail password reset instructions
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the backend rejects the request.
    pub async fn forgot_password(
        &self,
        request: &ForgotPasswordRequest,
    ) -> ClientResult<ApiResponse<Ack>> {
        validate(request)?;
        self.http.post("/api/v1/auth/forgot-password", request).await
    }

    /// Mint a new access token from a refresh token
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the refresh token.
    pub async fn refresh(&self, request: &RefreshRequest) -> ClientResult<ApiResponse<LoginResponse>> {
        self.http.post("/api/v1/auth/refresh", request).await
    }

    /// Account behind the current access token
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn me(&self) -> ClientResult<ApiResponse<User>> {
        self.http.get("/api/v1/auth/me", &[]).await
    }
}
