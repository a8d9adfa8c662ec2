//! HTTP client for communicating with the BizFlow backend

use crate::error::{ClientError, ClientResult};
use crate::session::Session;
use bizflow_core::config::{ApiConfig, RewriteRule, normalize_base_url};
use bizflow_core::types::ApiResponse;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

/// Query string parameters
pub type Query<'a> = &'a [(&'a str, String)];

/// HTTP client that injects the session's bearer token
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    rewrites: Arc<[RewriteRule]>,
    session: Session,
}

impl HttpClient {
    /// Create a client for the configured backend
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the TLS backend cannot be
    /// initialized.
    pub fn new(config: &ApiConfig, session: Session) -> ClientResult<Self> {
        let base_url = normalize_base_url(&config.base_url);
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(config.base_url.clone()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url,
            rewrites: config.rewrites.clone().into(),
            session,
        })
    }

    /// Session read on every request
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Normalized base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Apply the rewrite table (first match wins) and join with the base URL
    pub fn resolve(&self, path: &str) -> String {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        let rewritten = self
            .rewrites
            .iter()
            .find_map(|rule| rule.apply(&path))
            .unwrap_or(path);
        format!("{}{rewritten}", self.base_url)
    }

    /// GET an enveloped resource
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, an
    /// undecodable body, or an envelope whose code is not success.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Query<'_>,
    ) -> ClientResult<ApiResponse<T>> {
        let envelope = self.send(Method::GET, path, query, None::<&()>).await?;
        check_envelope(envelope)
    }

    /// POST a body and read an enveloped response
    ///
    /// # Errors
    ///
    /// See [`HttpClient::get`].
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<ApiResponse<T>>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let envelope = self.send(Method::POST, path, &[], Some(body)).await?;
        check_envelope(envelope)
    }

    /// PUT a body and read an enveloped response
    ///
    /// # Errors
    ///
    /// See [`HttpClient::get`].
    pub async fn put<B, T>(&self, path: &str, body: &B) -> ClientResult<ApiResponse<T>>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let envelope = self.send(Method::PUT, path, &[], Some(body)).await?;
        check_envelope(envelope)
    }

    /// DELETE a resource and read an enveloped response
    ///
    /// # Errors
    ///
    /// See [`HttpClient::get`].
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<ApiResponse<T>> {
        let envelope = self.send(Method::DELETE, path, &[], None::<&()>).await?;
        check_envelope(envelope)
    }

    /// POST a body and decode a bare (non-enveloped) JSON response
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable body.
    pub async fn post_raw<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, &[], Some(body)).await
    }

    async fn send<B, T>(
        &self,
        method: Method,
        path: &str,
        query: Query<'_>,
        body: Option<&B>,
    ) -> ClientResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.resolve(path);
        debug!(method = %method, url = %url, "Sending request");

        let mut request = self.client.request(method.clone(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = self.session.access_token() {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(error_from_response(status, &bytes, &method, &url));
        }

        if bytes.is_empty() {
            return Ok(serde_json::from_slice(b"null")?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn check_envelope<T>(envelope: ApiResponse<T>) -> ClientResult<ApiResponse<T>> {
    if envelope.is_success() {
        return Ok(envelope);
    }
    Err(ClientError::Api {
        status: StatusCode::OK.as_u16(),
        code: Some(envelope.code),
        message: envelope.message.unwrap_or_default(),
    })
}

fn error_from_response(status: StatusCode, body: &[u8], method: &Method, url: &str) -> ClientError {
    let envelope = serde_json::from_slice::<ApiResponse<serde::de::IgnoredAny>>(body).ok();
    let code = envelope.as_ref().map(|e| e.code);
    let message = envelope
        .and_then(|e| e.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());

    match status {
        StatusCode::UNAUTHORIZED => {
            warn!(method = %method, url = %url, "Token expired or missing");
            ClientError::Unauthorized { message }
        }
        StatusCode::FORBIDDEN => ClientError::Forbidden { message },
        _ => ClientError::Api {
            status: status.as_u16(),
            code,
            message,
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client(base_url: &str) -> HttpClient {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        };
        HttpClient::new(&config, Session::new()).unwrap()
    }

    #[test]
    fn test_resolve_applies_proxy_rewrites() {
        let http = client("http://localhost:8080/");

        assert_eq!(
            http.resolve("/api/v1/products"),
            "http://localhost:8080/v1/products"
        );
        assert_eq!(
            http.resolve("/api/api/v1/users"),
            "http://localhost:8080/api/v1/users"
        );
        assert_eq!(
            http.resolve("/api/api/ai/chat"),
            "http://localhost:8080/api/ai/chat"
        );
        assert_eq!(http.resolve("v1/health"), "http://localhost:8080/v1/health");
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let config = ApiConfig {
            base_url: "localhost:8080".to_string(),
            ..ApiConfig::default()
        };
        assert!(matches!(
            HttpClient::new(&config, Session::new()),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_error_from_envelope_body() {
        let body = r#"{"code": 4003, "message": "SKU đã tồn tại"}"#.as_bytes();
        let err = error_from_response(StatusCode::BAD_REQUEST, body, &Method::POST, "u");

        match err {
            ClientError::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 400);
                assert_eq!(code, Some(4003));
                assert_eq!(message, "SKU đã tồn tại");
            }
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn test_error_without_body_uses_reason() {
        let err = error_from_response(StatusCode::FORBIDDEN, b"", &Method::GET, "u");
        assert!(matches!(err, ClientError::Forbidden { ref message } if message == "Forbidden"));
    }

    #[test]
    fn test_failure_envelope_on_success_status() {
        let envelope: ApiResponse<()> = ApiResponse {
            code: 9999,
            message: Some("Lỗi hệ thống".to_string()),
            result: None,
            timestamp: None,
            errors: None,
        };
        let err = check_envelope(envelope).unwrap_err();
        assert_eq!(err.to_string(), "API error 200: Lỗi hệ thống");
    }
}
