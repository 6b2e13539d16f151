//! Neighborhood resolution for a set of matched labels
//!
//! The narrowed neighborhood of a label set is:
//! - the node descriptors carrying one of the labels;
//! - the relationship strings in which one of the labels occurs as a substring;
//! - the relationship property sets whose type occurs among those strings.
//!
//! Under [`NeighborhoodPolicy::FullVocabulary`] (the default) the relationship
//! lists are replaced by the complete lists of the snapshot, so every
//! relationship type stays visible no matter how narrow the label match was.
//! Node descriptors are always narrowed.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::matching::entity_matcher::match_entities;
use crate::schema_catalog::pattern_grammar::relationship_type;
use crate::schema_catalog::schema_types::{
    NodeDescriptor, RelationshipPropertySet, SchemaSnapshot,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborhoodPolicy {
    /// Expose every relationship and relationship property set
    #[default]
    FullVocabulary,
    /// Keep only relationships touching the matched labels
    MatchedOnly,
}

impl NeighborhoodPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            NeighborhoodPolicy::FullVocabulary => "full_vocabulary",
            NeighborhoodPolicy::MatchedOnly => "matched_only",
        }
    }
}

impl fmt::Display for NeighborhoodPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NeighborhoodPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full_vocabulary" => Ok(NeighborhoodPolicy::FullVocabulary),
            "matched_only" => Ok(NeighborhoodPolicy::MatchedOnly),
            other => Err(format!(
                "unknown neighborhood policy `{}` (expected full_vocabulary or matched_only)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Neighborhood {
    pub nodes: Vec<NodeDescriptor>,
    pub relationships: Vec<String>,
    pub relationship_properties: Vec<RelationshipPropertySet>,
}

/// Resolve the neighborhood of `matched_labels` within `snapshot`.
pub fn resolve_neighborhood<S: AsRef<str>>(
    matched_labels: &[S],
    snapshot: &SchemaSnapshot,
    policy: NeighborhoodPolicy,
) -> Neighborhood {
    let is_matched = |label: &str| matched_labels.iter().any(|m| m.as_ref() == label);

    let nodes: Vec<NodeDescriptor> = snapshot
        .nodes
        .iter()
        .filter(|n| is_matched(n.label.as_str()))
        .cloned()
        .collect();

    match policy {
        NeighborhoodPolicy::FullVocabulary => Neighborhood {
            nodes,
            relationships: snapshot.relationships.clone(),
            relationship_properties: snapshot.relationship_properties.clone(),
        },
        NeighborhoodPolicy::MatchedOnly => {
            let relationships: Vec<String> = snapshot
                .relationships
                .iter()
                .filter(|rel| matched_labels.iter().any(|m| rel.contains(m.as_ref())))
                .cloned()
                .collect();

            let local_types: HashSet<String> = relationships
                .iter()
                .filter_map(|rel| relationship_type(rel))
                .collect();

            // Types without properties have no entry here
            let relationship_properties = snapshot
                .relationship_properties
                .iter()
                .filter(|r| local_types.contains(&r.rel_type))
                .cloned()
                .collect();

            Neighborhood {
                nodes,
                relationships,
                relationship_properties,
            }
        }
    }
}

/// Match `entity` against the snapshot's labels, then resolve the neighborhood.
pub fn graph_neighborhood(
    entity: &str,
    max_edit_distance: usize,
    snapshot: &SchemaSnapshot,
    policy: NeighborhoodPolicy,
) -> Neighborhood {
    let labels = snapshot.node_labels();
    let matched = match_entities(entity, &labels, max_edit_distance);
    log::debug!(
        "Entity `{}` matched {} label(s) at distance <= {}: {:?}",
        entity,
        matched.len(),
        max_edit_distance,
        matched
    );
    resolve_neighborhood(&matched, snapshot, policy)
}
