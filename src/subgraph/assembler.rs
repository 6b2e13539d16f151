//! Subschema assembly and prompt rendering
//!
//! The rendered text is a fixed three-section template. For identical input
//! it is byte-identical, so downstream prompt caches and text matchers can
//! rely on it. Every string inside a section is a double-quoted literal, so
//! distinct schemas never render to the same text.

use std::fmt;

use super::neighborhood::{graph_neighborhood, NeighborhoodPolicy};
use crate::schema_catalog::schema_types::{
    write_list, NodeDescriptor, PropertyDescriptor, Quoted, RelationshipPropertySet,
    SchemaSnapshot,
};

/// Neighborhoods of several entities, flattened in entity order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubgraphSchema {
    pub nodes: Vec<NodeDescriptor>,
    pub relationships: Vec<String>,
    pub relationship_properties: Vec<RelationshipPropertySet>,
}

impl fmt::Display for SubgraphSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Node properties are the following:")?;
        write_list(f, &self.nodes)?;
        writeln!(f)?;
        writeln!(f, "The relations are the following:")?;
        write_list(f, self.relationships.iter().map(|r| Quoted(r)))?;
        writeln!(f)?;
        writeln!(f, "Relations properties are the following:")?;
        write_list(f, &self.relationship_properties)?;
        writeln!(f)
    }
}

/// Resolve the neighborhood of every entity and concatenate the results.
///
/// No deduplication happens here: under the full-vocabulary policy each entity
/// contributes the complete relationship lists again.
pub fn subgraph_schema<S: AsRef<str>>(
    entities: &[S],
    snapshot: &SchemaSnapshot,
    max_edit_distance: usize,
    policy: NeighborhoodPolicy,
) -> SubgraphSchema {
    let mut subgraph = SubgraphSchema::default();

    for entity in entities {
        let hood = graph_neighborhood(entity.as_ref(), max_edit_distance, snapshot, policy);
        subgraph.nodes.extend(hood.nodes);
        subgraph.relationships.extend(hood.relationships);
        subgraph
            .relationship_properties
            .extend(hood.relationship_properties);
    }

    log::debug!(
        "Subgraph for {} entities: {} nodes, {} relationships, {} relationship property sets",
        entities.len(),
        subgraph.nodes.len(),
        subgraph.relationships.len(),
        subgraph.relationship_properties.len()
    );
    subgraph
}

/// Render the subschema text for `entities`.
pub fn build_subschema<S: AsRef<str>>(
    entities: &[S],
    snapshot: &SchemaSnapshot,
    max_edit_distance: usize,
    policy: NeighborhoodPolicy,
) -> String {
    subgraph_schema(entities, snapshot, max_edit_distance, policy).to_string()
}

/// Whole schema with property types
pub fn render_full_schema(snapshot: &SchemaSnapshot) -> String {
    let mut out = String::new();
    out.push_str("Node properties are the following:\n");
    out.push_str(&bracketed(snapshot.nodes.iter().map(|n| n.to_string())));
    out.push_str("\nRelationship properties are the following:\n");
    out.push_str(&bracketed(
        snapshot.relationship_properties.iter().map(|r| r.to_string()),
    ));
    out.push_str("\nThe relationships are the following:\n");
    out.push_str(&quoted_list(&snapshot.relationships));
    out.push('\n');
    out
}

/// Whole schema with property names only
pub fn render_simplified_schema(snapshot: &SchemaSnapshot) -> String {
    fn names(props: &[PropertyDescriptor]) -> String {
        bracketed(props.iter().map(|p| Quoted(&p.name).to_string()))
    }

    let mut out = String::new();
    out.push_str("Node properties are the following:\n");
    out.push_str(&bracketed(snapshot.nodes.iter().map(|n| {
        format!("{{labels: {}, properties: {}}}", Quoted(&n.label), names(&n.properties))
    })));
    out.push_str("\nThe relationships are the following:\n");
    out.push_str(&quoted_list(&snapshot.relationships));
    out.push_str("\nRelationship properties are the following:\n");
    out.push_str(&bracketed(snapshot.relationship_properties.iter().map(|r| {
        format!("{{type: {}, properties: {}}}", Quoted(&r.rel_type), names(&r.properties))
    })));
    out.push('\n');
    out
}

fn bracketed(items: impl Iterator<Item = String>) -> String {
    format!("[{}]", items.collect::<Vec<_>>().join(", "))
}

fn quoted_list(items: &[String]) -> String {
    bracketed(items.iter().map(|item| Quoted(item).to_string()))
}
