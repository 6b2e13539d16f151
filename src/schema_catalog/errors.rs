//! # Schema Catalog Error Types
//!
//! Errors raised while turning raw schema metadata into a [`SchemaSnapshot`]
//! and while reading or writing the cached schema file.
//!
//! ## Error Categories
//!
//! - **Grammar Errors**: relationship strings that do not follow
//!   `(:Source)-[:TYPE]->(:Target)`. The record parser skips these; the
//!   variant exists so strict callers can surface them.
//! - **Record Errors**: rows that are neither null nor a valid record.
//! - **Schema File Errors**: I/O and JSON problems in the schema store.
//!
//! [`SchemaSnapshot`]: super::schema_types::SchemaSnapshot

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SchemaCatalogError {
    #[error("Relationship string `{raw}` does not match `(:Source)-[:TYPE]->(:Target)`")]
    MalformedSchemaString { raw: String },
    #[error("Invalid {kind} record: {message}")]
    InvalidRecord { kind: String, message: String },
    #[error("Failed to read schema file '{path}': {error}")]
    SchemaFileRead { path: String, error: String },
    #[error("Failed to parse schema file '{path}': {error}")]
    SchemaFileParse { path: String, error: String },
    #[error("Failed to write schema file '{path}': {error}")]
    SchemaFileWrite { path: String, error: String },
}

impl SchemaCatalogError {
    /// Create an InvalidRecord error for one of the three record kinds
    ///
    /// # Example
    /// ```ignore
    /// SchemaCatalogError::invalid_record("node", "missing `labels` field")
    /// ```
    pub fn invalid_record(kind: impl Into<String>, message: impl Into<String>) -> Self {
        SchemaCatalogError::InvalidRecord {
            kind: kind.into(),
            message: message.into(),
        }
    }
}
