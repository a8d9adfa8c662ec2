//! Authentication state provider

use crate::error::{ClientError, ClientResult};
use crate::services::AuthService;
use crate::session::{Session, TokenStore, Tokens};
use bizflow_core::types::{LoginRequest, LoginResponse, RefreshRequest};
use std::sync::Arc;
use tracing::{debug, info};

/// The only component that changes the [`Session`]
///
/// Every change is mirrored to the [`TokenStore`] so it survives restarts.
#[derive(Debug, Clone)]
pub struct AuthProvider {
    service: AuthService,
    session: Session,
    store: Arc<dyn TokenStore>,
}

impl AuthProvider {
    /// Create a provider
    ///
    /// `session` must be the handle the HTTP client was built with.
    pub fn new(service: AuthService, session: Session, store: Arc<dyn TokenStore>) -> Self {
        Self {
            service,
            session,
            store,
        }
    }

    /// Session managed by this provider
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Load persisted tokens into the session
    ///
    /// Returns whether an access token was found.
    ///
    /// # Errors
    ///
    /// Returns an error if the token store cannot be read.
    pub fn restore(&self) -> ClientResult<bool> {
        let tokens = self.store.load()?;
        let found = tokens.has_access_token();
        self.session.replace(tokens);
        debug!(found, "Session restored");
        Ok(found)
    }

    /// Sign in and persist the returned token pair
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, or [`ClientError::MissingResult`]
    /// when the backend accepted the credentials but sent no token.
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        let envelope = self.service.login(request).await?;
        let response = envelope.result.ok_or(ClientError::MissingResult)?;
        let token = response
            .token
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or(ClientError::MissingResult)?;

        let tokens = Tokens::new(token, response.refresh_token.clone());
        self.store.save(&tokens)?;
        self.session.replace(tokens);

        info!(username = %request.username, "Logged in");
        Ok(response)
    }

    /// Forget both tokens
    ///
    /// The in-memory session is cleared even when the store fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the token store cannot be cleared.
    pub fn logout(&self) -> ClientResult<()> {
        self.session.replace(Tokens::default());
        self.store.clear()?;
        info!("Logged out");
        Ok(())
    }

    /// Exchange the refresh token for a new access token
    ///
    /// # Errors
    ///
    /// Returns an error if there is no refresh token, the backend rejects it,
    /// or the response carries no token.
    pub async fn refresh(&self) -> ClientResult<()> {
        let refresh_token = self
            .session
            .refresh_token()
            .ok_or_else(|| ClientError::session("no refresh token stored"))?;

        let envelope = self
            .service
            .refresh(&RefreshRequest {
                refresh_token: refresh_token.clone(),
            })
            .await?;
        let response = envelope.result.ok_or(ClientError::MissingResult)?;
        let token = response
            .token
            .filter(|t| !t.is_empty())
            .ok_or(ClientError::MissingResult)?;

        let tokens = Tokens::new(token, response.refresh_token.or(Some(refresh_token)));
        self.store.save(&tokens)?;
        self.session.replace(tokens);

        debug!("Access token refreshed");
        Ok(())
    }
}
