//! Login, registration and password recovery forms

use crate::app::App;
use crate::messages;
use crate::shell::Route;
use bizflow_client::services::AuthService;
use bizflow_client::{AuthProvider, ClientError};
use bizflow_core::types::{ForgotPasswordRequest, LoginRequest, RegisterRequest};
use tracing::{info, warn};

/// Sign-in form
#[derive(Debug, Clone)]
pub struct LoginView {
    auth: AuthProvider,
    username: String,
    password: String,
    error: Option<String>,
    is_loading: bool,
}

impl LoginView {
    /// Empty form
    pub fn new(app: &App) -> Self {
        Self {
            auth: app.auth.clone(),
            username: String::new(),
            password: String::new(),
            error: None,
            is_loading: false,
        }
    }

    /// Edit the username; clears the error
    pub fn set_username(&mut self, value: impl Into<String>) {
        self.username = value.into();
        self.error = None;
    }

    /// Edit the password; clears the error
    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
        self.error = None;
    }

    /// Message of the last failed attempt
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a submission is in flight
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Sign in; returns the route to go to on success
    pub async fn submit(&mut self) -> Option<Route> {
        self.error = None;
        self.is_loading = true;

        let request = LoginRequest {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        };
        let outcome = self.auth.login(&request).await;
        self.is_loading = false;

        match outcome {
            Ok(response) => {
                info!(username = ?response.username, "Signed in");
                Some(Route::Home)
            }
            Err(ClientError::MissingResult) => {
                self.error = Some(messages::LOGIN_NO_TOKEN.to_string());
                None
            }
            Err(err) => {
                warn!(error = %err, "Sign-in failed");
                self.error = Some(messages::server_or(&err, messages::LOGIN_FAILED));
                None
            }
        }
    }
}

/// Registration form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    /// Display name
    pub full_name: String,
    /// Login name
    pub username: String,
    /// Email, optional
    pub email: String,
    /// Phone, optional
    pub phone: String,
    /// Password
    pub password: String,
    /// Password again
    pub confirm_password: String,
}

impl RegisterForm {
    fn to_request(&self) -> RegisterRequest {
        let optional = |raw: &str| {
            let raw = raw.trim();
            (!raw.is_empty()).then(|| raw.to_string())
        };
        RegisterRequest {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            full_name: self.full_name.trim().to_string(),
            email: optional(&self.email),
            phone: optional(&self.phone),
        }
    }
}

/// Account creation screen
#[derive(Debug, Clone)]
pub struct RegisterView {
    service: AuthService,
    /// Form fields
    pub form: RegisterForm,
    error: Option<String>,
    success: Option<&'static str>,
}

impl RegisterView {
    /// Empty form
    pub fn new(app: &App) -> Self {
        Self {
            service: app.services.auth.clone(),
            form: RegisterForm::default(),
            error: None,
            success: None,
        }
    }

    /// Message of the last failure
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Message of the last success
    pub const fn success(&self) -> Option<&'static str> {
        self.success
    }

    /// Create the account; returns the login route on success
    ///
    /// A mismatched confirmation fails without sending anything.
    pub async fn submit(&mut self) -> Option<Route> {
        self.error = None;
        self.success = None;

        if self.form.password != self.form.confirm_password {
            self.error = Some(messages::PASSWORD_MISMATCH.to_string());
            return None;
        }

        match self.service.register(&self.form.to_request()).await {
            Ok(_) => {
                info!(username = %self.form.username, "Account registered");
                self.success = Some(messages::REGISTER_SUCCESS);
                Some(Route::Login)
            }
            Err(err) => {
                warn!(error = %err, "Registration failed");
                self.error = Some(messages::server_or(&err, messages::REGISTER_FAILED));
                None
            }
        }
    }
}

/// Password recovery screen
#[derive(Debug, Clone)]
pub struct ForgotPasswordView {
    service: AuthService,
    email: String,
    outcome: Option<Result<&'static str, &'static str>>,
}

impl ForgotPasswordView {
    /// Empty form
    pub fn new(app: &App) -> Self {
        Self {
            service: app.services.auth.clone(),
            email: String::new(),
            outcome: None,
        }
    }

    /// Edit the email
    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
    }

    /// Result of the last submission: the success or failure message
    pub const fn outcome(&self) -> Option<Result<&'static str, &'static str>> {
        self.outcome
    }

    /// Ask the backend to send reset instructions
    pub async fn submit(&mut self) -> Result<&'static str, &'static str> {
        let request = ForgotPasswordRequest {
            email: self.email.trim().to_string(),
        };
        let outcome = match self.service.forgot_password(&request).await {
            Ok(_) => Ok(messages::FORGOT_SUCCESS),
            Err(err) => {
                warn!(error = %err, "Password recovery failed");
                Err(messages::FORGOT_FAILED)
            }
        };
        self.outcome = Some(outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_register_request_drops_blank_optionals() {
        let form = RegisterForm {
            full_name: " Trần Văn An ".to_string(),
            username: "an.tran".to_string(),
            email: "  ".to_string(),
            phone: "0901234567".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        };

        let request = form.to_request();

        assert_eq!(request.full_name, "Trần Văn An");
        assert_eq!(request.email, None);
        assert_eq!(request.phone.as_deref(), Some("0901234567"));
    }
}
