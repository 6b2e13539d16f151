//! Integration tests - Extraction pipelines end to end
//!
//! A canned in-process executor stands in for Neo4j, so these run without a
//! database while exercising the same code paths as the CLI.

mod extraction_pipeline_tests;
mod static_executor;
