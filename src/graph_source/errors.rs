//! # Graph Source Error Types
//!
//! Failures of the schema/instance source. These are propagated unchanged to
//! the caller; nothing in this crate retries a failed query.

use thiserror::Error;

use crate::schema_catalog::errors::SchemaCatalogError;

#[derive(Debug, Error)]
pub enum GraphSourceError {
    #[error("Could not reach graph database at {endpoint}: {message}")]
    ConnectivityFailure { endpoint: String, message: String },
    #[error("Query failed with {code}: {message}")]
    QueryFailed { code: String, message: String },
    #[error("Unexpected response from graph database: {message}")]
    UnexpectedResponse { message: String },
    #[error(transparent)]
    Schema(#[from] SchemaCatalogError),
}

impl GraphSourceError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        GraphSourceError::UnexpectedResponse {
            message: message.into(),
        }
    }
}
