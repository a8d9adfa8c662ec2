//! Error types for the query cache

use bizflow_client::ClientError;
use std::sync::Arc;
use thiserror::Error;

/// Result type alias for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors surfaced by queries and mutations
#[derive(Error, Debug, Clone)]
pub enum QueryError {
    /// The fetch failed; every observer of that fetch shares the same error
    #[error("Fetch failed: {0}")]
    Fetch(#[source] Arc<ClientError>),

    /// The mutation was rejected; nothing was invalidated
    #[error("Mutation failed: {0}")]
    Mutation(#[source] Arc<ClientError>),

    /// A key was observed with a different data type than it was registered with
    #[error("Query '{key}' is registered with a different type than {expected}")]
    TypeMismatch {
        /// Offending key
        key: String,
        /// Type requested by the caller
        expected: &'static str,
    },
}

impl QueryError {
    /// Underlying client error, if any
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Fetch(err) | Self::Mutation(err) => Some(err),
            Self::TypeMismatch { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_client_error_access() {
        let err = QueryError::Mutation(Arc::new(ClientError::Forbidden {
            message: "Access Denied".to_string(),
        }));
        assert!(err.client_error().is_some_and(ClientError::is_forbidden));

        let mismatch = QueryError::TypeMismatch {
            key: "users".to_string(),
            expected: "Vec<Product>",
        };
        assert!(mismatch.client_error().is_none());
        assert_eq!(
            mismatch.to_string(),
            "Query 'users' is registered with a different type than Vec<Product>"
        );
    }
}
