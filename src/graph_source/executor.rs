//! Query execution seam
//!
//! Everything that talks to the database goes through [`QueryExecutor`].
//! Rows come back as JSON objects keyed by column name and are converted to
//! typed records by the caller immediately.

use async_trait::async_trait;

use super::errors::GraphSourceError;

pub type Row = serde_json::Map<String, serde_json::Value>;
pub type QueryParams = serde_json::Map<String, serde_json::Value>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Run one read query and return all rows.
    async fn execute(
        &self,
        query: &str,
        params: &QueryParams,
    ) -> Result<Vec<Row>, GraphSourceError>;
}

/// Parameters with a single `limit` entry
pub fn limit_params(limit: usize) -> QueryParams {
    let mut params = QueryParams::new();
    params.insert("limit".to_string(), serde_json::json!(limit));
    params
}
