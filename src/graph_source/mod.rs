//! Reading schema and instances from a live graph database.
//!
//! The core modules never touch the database; they work on the typed records
//! this module produces.

pub mod errors;
pub mod executor;
pub mod extractor;
pub mod neo4j_http;
pub mod queries;

pub use errors::GraphSourceError;
pub use executor::{QueryExecutor, QueryParams, Row};
pub use extractor::{SchemaExtractor, SchemaList};
pub use neo4j_http::Neo4jHttpExecutor;
