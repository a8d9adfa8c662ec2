//! Error types for view models and exports

use bizflow_client::ClientError;
use bizflow_core::types::EntityId;
use bizflow_query::QueryError;
use thiserror::Error;

/// Result type alias for view operations
pub type ViewResult<T> = Result<T, ViewError>;

/// Errors raised by view models
#[derive(Error, Debug)]
pub enum ViewError {
    /// Request failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Cache or mutation failed
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Export could not be written
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Configuration or logging setup failed
    #[error(transparent)]
    Core(#[from] bizflow_core::Error),

    /// `confirm_delete` without a pending `request_delete`
    #[error("No deletion is awaiting confirmation")]
    NothingToConfirm,

    /// Product id absent from the loaded catalog
    #[error("Product {0} is not in the catalog")]
    ProductNotFound(EntityId),

    /// Form action while no form is open
    #[error("No product form is open")]
    NoOpenForm,

    /// A form field could not be coerced
    #[error("Invalid value for {field}: {message}")]
    InvalidField {
        /// Field name
        field: &'static str,
        /// What was wrong
        message: String,
    },
}

impl ViewError {
    /// Create an invalid field error
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }

    /// Underlying client error, if any
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Client(err) => Some(err),
            Self::Query(err) => err.client_error(),
            _ => None,
        }
    }
}

/// Errors raised while exporting the catalog
#[derive(Error, Debug)]
pub enum ExportError {
    /// Nothing matched the current filters
    #[error("Không có dữ liệu để xuất!")]
    Empty,

    /// CSV encoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File could not be written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
