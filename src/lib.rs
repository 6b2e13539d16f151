//! kgschema - Graph schema subschemas for prompt construction
//!
//! This crate extracts the schema of a property graph and narrows it to the
//! part relevant to a question:
//! - Parsing of APOC-style schema records into a typed snapshot
//! - Edit-distance and question-based matching of entities to node labels
//! - Subschema assembly and prompt-ready rendering
//! - Typed projection and sampling of node and relationship instances

pub mod config;
pub mod graph_source;
pub mod instances;
pub mod matching;
pub mod schema_catalog;
pub mod subgraph;
