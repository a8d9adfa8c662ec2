//! Session context and token persistence
//!
//! The [`Session`] is handed to the HTTP client at construction and read on
//! every request. Only [`crate::AuthProvider`] changes it; views just ask
//! whether it holds a token.

use crate::error::{ClientError, ClientResult};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Storage key of the access token
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Storage key of the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Persisted token pair
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokens {
    /// Bearer credential
    #[serde(rename = "accessToken", default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Credential used to mint a new access token
    #[serde(rename = "refreshToken", default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl Tokens {
    /// Create a token pair
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            refresh_token,
        }
    }

    /// Whether an access token is present
    pub fn has_access_token(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

impl fmt::Debug for Tokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |t: &Option<String>| t.as_ref().map(|_| "<redacted>");
        f.debug_struct("Tokens")
            .field("access_token", &redact(&self.access_token))
            .field("refresh_token", &redact(&self.refresh_token))
            .finish()
    }
}

/// Shared handle to the current credentials
#[derive(Clone, Debug, Default)]
pub struct Session {
    tokens: Arc<RwLock<Tokens>>,
}

impl Session {
    /// Create an empty (logged out) session
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session that already holds credentials
    pub fn with_tokens(tokens: Tokens) -> Self {
        Self {
            tokens: Arc::new(RwLock::new(tokens)),
        }
    }

    /// Current access token
    pub fn access_token(&self) -> Option<String> {
        self.tokens
            .read()
            .access_token
            .clone()
            .filter(|t| !t.is_empty())
    }

    /// Current refresh token
    pub fn refresh_token(&self) -> Option<String> {
        self.tokens.read().refresh_token.clone()
    }

    /// Whether a bearer credential is available
    pub fn is_authenticated(&self) -> bool {
        self.tokens.read().has_access_token()
    }

    /// Copy of the current token pair
    pub fn snapshot(&self) -> Tokens {
        self.tokens.read().clone()
    }

    pub(crate) fn replace(&self, tokens: Tokens) {
        *self.tokens.write() = tokens;
    }
}

/// Persistence for the token pair
pub trait TokenStore: Send + Sync + fmt::Debug {
    /// Read the persisted tokens; an absent store yields empty tokens
    fn load(&self) -> ClientResult<Tokens>;

    /// Persist the tokens, replacing what was stored
    fn save(&self, tokens: &Tokens) -> ClientResult<()>;

    /// Remove both tokens
    fn clear(&self) -> ClientResult<()>;
}

/// JSON file holding `{"accessToken": ..., "refreshToken": ...}`
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store tokens at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the token file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> ClientResult<Tokens> {
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(Tokens::default()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Tokens::default()),
            Err(e) => Err(ClientError::session(format!(
                "failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn save(&self, tokens: &Tokens) -> ClientResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                ClientError::session(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
        let body = serde_json::to_vec_pretty(tokens)?;
        std::fs::write(&self.path, body).map_err(|e| {
            ClientError::session(format!("failed to write {}: {e}", self.path.display()))
        })?;
        debug!(path = %self.path.display(), "Session tokens persisted");
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::session(format!(
                "failed to remove {}: {e}",
                self.path.display()
            ))),
        }
    }
}

/// In-memory store, used by tests and short-lived tools
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<Tokens>,
}

impl MemoryTokenStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with tokens
    pub fn with_tokens(tokens: Tokens) -> Self {
        Self {
            tokens: Mutex::new(tokens),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> ClientResult<Tokens> {
        Ok(self.tokens.lock().clone())
    }

    fn save(&self, tokens: &Tokens) -> ClientResult<()> {
        *self.tokens.lock() = tokens.clone();
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        *self.tokens.lock() = Tokens::default();
        Ok(())
    }
}
