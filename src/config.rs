use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use validator::Validate;

use crate::matching::question_parser::DEFAULT_FUZZY_THRESHOLD;
use crate::subgraph::neighborhood::NeighborhoodPolicy;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Extraction and matching configuration with validation
#[derive(Clone, Debug, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Base URL of the Neo4j HTTP endpoint
    #[validate(length(min = 1, message = "Neo4j URL cannot be empty"))]
    pub neo4j_url: String,

    #[validate(length(min = 1, message = "Neo4j user cannot be empty"))]
    pub neo4j_user: String,

    pub neo4j_password: String,

    #[validate(length(min = 1, message = "Neo4j database cannot be empty"))]
    pub neo4j_database: String,

    /// Largest Levenshtein distance at which an entity matches a label
    #[validate(range(max = 32, message = "Max edit distance must be between 0 and 32"))]
    pub max_edit_distance: usize,

    /// Minimum similarity ratio (0-100) for fuzzy question matching
    #[validate(range(max = 100, message = "Fuzzy threshold must be between 0 and 100"))]
    pub fuzzy_threshold: u32,

    /// Instances sampled per label or relationship pattern
    #[validate(range(min = 1, message = "Instance limit must be at least 1"))]
    pub instance_limit: usize,

    #[validate(range(
        min = 1,
        max = 3600,
        message = "Request timeout must be between 1 and 3600 seconds"
    ))]
    pub request_timeout_secs: u64,

    pub neighborhood_policy: NeighborhoodPolicy,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            neo4j_url: "http://localhost:7474".to_string(),
            neo4j_user: "neo4j".to_string(),
            neo4j_password: String::new(),
            neo4j_database: "neo4j".to_string(),
            max_edit_distance: 2,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            instance_limit: 10,
            request_timeout_secs: 30,
            neighborhood_policy: NeighborhoodPolicy::default(),
        }
    }
}

impl ExtractorConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let policy = env::var("KGSCHEMA_NEIGHBORHOOD_POLICY")
            .unwrap_or_else(|_| NeighborhoodPolicy::default().to_string());

        let config = Self {
            neo4j_url: env::var("KGSCHEMA_NEO4J_URL")
                .unwrap_or_else(|_| "http://localhost:7474".to_string()),
            neo4j_user: env::var("KGSCHEMA_NEO4J_USER").unwrap_or_else(|_| "neo4j".to_string()),
            neo4j_password: env::var("KGSCHEMA_NEO4J_PASSWORD").unwrap_or_default(),
            neo4j_database: env::var("KGSCHEMA_NEO4J_DATABASE")
                .unwrap_or_else(|_| "neo4j".to_string()),
            max_edit_distance: parse_env_var("KGSCHEMA_MAX_EDIT_DISTANCE", "2")?,
            fuzzy_threshold: parse_env_var(
                "KGSCHEMA_FUZZY_THRESHOLD",
                &DEFAULT_FUZZY_THRESHOLD.to_string(),
            )?,
            instance_limit: parse_env_var("KGSCHEMA_INSTANCE_LIMIT", "10")?,
            request_timeout_secs: parse_env_var("KGSCHEMA_REQUEST_TIMEOUT_SECS", "30")?,
            neighborhood_policy: policy.parse().map_err(|e: String| ConfigError::Parse {
                field: "KGSCHEMA_NEIGHBORHOOD_POLICY".to_string(),
                value: policy.clone(),
                source: e.into(),
            })?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from CLI arguments with validation
    pub fn from_cli(cli: CliConfig) -> Result<Self, ConfigError> {
        let config = Self {
            neo4j_url: cli.neo4j_url,
            neo4j_user: cli.neo4j_user,
            neo4j_password: cli.neo4j_password,
            neo4j_database: cli.neo4j_database,
            max_edit_distance: cli.max_edit_distance,
            fuzzy_threshold: cli.fuzzy_threshold,
            instance_limit: cli.instance_limit,
            request_timeout_secs: cli.request_timeout_secs,
            neighborhood_policy: cli.neighborhood_policy,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file; missing keys take their defaults
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }
}

/// CLI configuration (parsed from command line arguments)
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub neo4j_url: String,
    pub neo4j_user: String,
    pub neo4j_password: String,
    pub neo4j_database: String,
    pub max_edit_distance: usize,
    pub fuzzy_threshold: u32,
    pub instance_limit: usize,
    pub request_timeout_secs: u64,
    pub neighborhood_policy: NeighborhoodPolicy,
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}
