//! Neo4j client over the HTTP transactional endpoint
//!
//! Each query is sent as a single auto-committed statement to
//! `{url}/db/{database}/tx/commit`. Transport failures and authentication
//! failures map to [`GraphSourceError::ConnectivityFailure`]; errors reported
//! by Neo4j in the response body map to [`GraphSourceError::QueryFailed`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::errors::GraphSourceError;
use super::executor::{QueryExecutor, QueryParams, Row};
use crate::config::ExtractorConfig;

#[derive(Serialize)]
struct TxRequest<'a> {
    statements: [TxStatement<'a>; 1],
}

#[derive(Serialize)]
struct TxStatement<'a> {
    statement: &'a str,
    parameters: &'a QueryParams,
}

#[derive(Debug, Deserialize)]
struct TxResponse {
    #[serde(default)]
    results: Vec<TxResult>,
    #[serde(default)]
    errors: Vec<TxError>,
}

#[derive(Debug, Deserialize)]
struct TxResult {
    columns: Vec<String>,
    #[serde(default)]
    data: Vec<TxData>,
}

#[derive(Debug, Deserialize)]
struct TxData {
    row: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct TxError {
    code: String,
    message: String,
}

pub struct Neo4jHttpExecutor {
    client: reqwest::Client,
    endpoint: String,
    user: String,
    password: String,
}

impl Neo4jHttpExecutor {
    pub fn new(
        url: &str,
        database: &str,
        user: impl Into<String>,
        password: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GraphSourceError> {
        let endpoint = format!("{}/db/{}/tx/commit", url.trim_end_matches('/'), database);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GraphSourceError::ConnectivityFailure {
                endpoint: endpoint.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint,
            user: user.into(),
            password: password.into(),
        })
    }

    pub fn from_config(config: &ExtractorConfig) -> Result<Self, GraphSourceError> {
        Self::new(
            &config.neo4j_url,
            &config.neo4j_database,
            config.neo4j_user.clone(),
            config.neo4j_password.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run a trivial query to check the URL and credentials
    pub async fn verify_connectivity(&self) -> Result<(), GraphSourceError> {
        self.execute("RETURN 1 AS ok", &QueryParams::new()).await?;
        log::info!("✓ Connected to {}", self.endpoint);
        Ok(())
    }

    fn connectivity_error(&self, message: impl Into<String>) -> GraphSourceError {
        GraphSourceError::ConnectivityFailure {
            endpoint: self.endpoint.clone(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl QueryExecutor for Neo4jHttpExecutor {
    async fn execute(
        &self,
        query: &str,
        params: &QueryParams,
    ) -> Result<Vec<Row>, GraphSourceError> {
        log::debug!("{}", query.trim());

        let body = TxRequest {
            statements: [TxStatement {
                statement: query,
                parameters: params,
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.user, Some(&self.password))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.connectivity_error(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(self.connectivity_error(
                "authentication failed, please ensure that the username and password are correct",
            ));
        }
        if !status.is_success() {
            return Err(self.connectivity_error(format!("HTTP status {}", status)));
        }

        let tx: TxResponse = response
            .json()
            .await
            .map_err(|e| GraphSourceError::unexpected(e.to_string()))?;

        rows_from_response(tx)
    }
}

fn rows_from_response(tx: TxResponse) -> Result<Vec<Row>, GraphSourceError> {
    if let Some(error) = tx.errors.into_iter().next() {
        return Err(GraphSourceError::QueryFailed {
            code: error.code,
            message: error.message,
        });
    }

    let Some(result) = tx.results.into_iter().next() else {
        return Ok(Vec::new());
    };

    result
        .data
        .into_iter()
        .map(|data| {
            if data.row.len() != result.columns.len() {
                return Err(GraphSourceError::unexpected(format!(
                    "row has {} values for {} columns",
                    data.row.len(),
                    result.columns.len()
                )));
            }
            Ok(result.columns.iter().cloned().zip(data.row).collect())
        })
        .collect()
}
