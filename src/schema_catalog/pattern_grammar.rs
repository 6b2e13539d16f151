//! Grammar for relationship pattern strings
//!
//! The schema source reports relationships as flat strings of the form
//! `(:Source)-[:TYPE]->(:Target)`. This module is the single place those
//! strings are parsed and re-rendered.
//!
//! # Grammar
//!
//! ```text
//! edge     := "(:" source ")-[:" rel_type "]->(:" target ")"
//! source   := any characters except ")"
//! rel_type := shortest run of characters up to "]->(:"
//! target   := shortest run of characters up to ")"
//! ```
//!
//! A string may hold several edges; every match is taken. Strings with no
//! match contribute nothing and never fail the surrounding extraction.
//!
//! The type-only grammar is narrower: the text between the first `[:` and the
//! following `]`.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use super::errors::SchemaCatalogError;
use super::schema_types::RelationshipEdge;

/// Captures: (source) (rel_type) (target)
static EDGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(:(?P<source>[^)]*?)\)-\[:(?P<rel_type>.*?)\]->\(:(?P<target>.*?)\)").unwrap()
});

/// Captures: (rel_type)
static REL_TYPE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[:(?P<rel_type>[^\]]*)\]").unwrap());

/// Parse every edge found in `raw`. Returns an empty vector for malformed input.
pub fn parse_edges(raw: &str) -> Vec<RelationshipEdge> {
    let edges: Vec<RelationshipEdge> = EDGE_PATTERN
        .captures_iter(raw)
        .map(|caps| RelationshipEdge::new(&caps["source"], &caps["rel_type"], &caps["target"]))
        .collect();

    if edges.is_empty() {
        log::debug!("Skipping malformed relationship string: {}", raw);
    }
    edges
}

/// Parse exactly one edge (the first match), reporting malformed input as an error.
///
/// Extraction paths use [`parse_edges`], which skips instead of failing.
pub fn parse_edge(raw: &str) -> Result<RelationshipEdge, SchemaCatalogError> {
    EDGE_PATTERN
        .captures(raw)
        .map(|caps| RelationshipEdge::new(&caps["source"], &caps["rel_type"], &caps["target"]))
        .ok_or_else(|| SchemaCatalogError::MalformedSchemaString {
            raw: raw.to_string(),
        })
}

/// Re-serialize an edge into its canonical pattern string
pub fn render_edge(edge: &RelationshipEdge) -> String {
    format!(
        "(:{})-[:{}]->(:{})",
        edge.source_label, edge.rel_type, edge.target_label
    )
}

/// Relationship type of a pattern string: the first `[:TYPE]` occurrence.
pub fn relationship_type(raw: &str) -> Option<String> {
    REL_TYPE_PATTERN
        .captures(raw)
        .map(|caps| caps["rel_type"].to_string())
}

/// Unique relationship types mentioned anywhere in `rels`, sorted.
pub fn extract_relationships_list<S: AsRef<str>>(rels: &[S]) -> Vec<String> {
    let mut types = BTreeSet::new();
    for entry in rels {
        for caps in REL_TYPE_PATTERN.captures_iter(entry.as_ref()) {
            types.insert(caps["rel_type"].to_string());
        }
    }
    types.into_iter().collect()
}

/// Every `(source, type, target)` triple in `rels`, in input order.
pub fn extract_relationships_triples<S: AsRef<str>>(rels: &[S]) -> Vec<RelationshipEdge> {
    rels.iter()
        .flat_map(|entry| parse_edges(entry.as_ref()))
        .collect()
}
