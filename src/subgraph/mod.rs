//! Subgraph schema extraction
//!
//! Given entity strings and a schema snapshot, collect the node descriptors
//! whose labels are close to the entities together with the relationship
//! vocabulary around them, and render the result as prompt text.

pub mod assembler;
pub mod neighborhood;

pub use assembler::{
    build_subschema, render_full_schema, render_simplified_schema, subgraph_schema,
    SubgraphSchema,
};
pub use neighborhood::{graph_neighborhood, resolve_neighborhood, Neighborhood, NeighborhoodPolicy};
