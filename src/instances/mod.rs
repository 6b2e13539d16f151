//! Instance data projection
//!
//! Raw node and relationship instances sampled from the graph are mapped onto
//! the typed-property selections of the schema, producing
//! `(label, property, value)` triples for nodes and
//! `(source label, source properties, type, target label, target properties)`
//! rows for relationships.

pub mod errors;
pub mod projector;
pub mod sampling;
pub mod values;

pub use errors::ProjectionError;
pub use projector::{
    add_selected_properties, canonicalize_node_instances, canonicalize_relationship_instances,
    combine_rels_with_labels, extract_subdict, project_node_instances,
    project_relationship_instances, NodeTriple, RelationshipProjection, RelationshipRow,
};
pub use sampling::{random_properties, SampledPair, UsedPairs};
pub use values::{NodeInstance, PropertyMap, PropertyValue, RelationshipInstance};
