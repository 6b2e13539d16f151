pub mod errors;
pub mod pattern_grammar;
pub mod record_parser;
pub mod schema_store;
pub mod schema_types;
pub mod type_filter;

// Re-export commonly used types
pub use errors::SchemaCatalogError;
pub use record_parser::{parse_schema_records, FilteredCounts, ParsedSchema, RawSchemaRecords};
pub use schema_store::{load_schema, save_schema, save_schema_simplified};
pub use schema_types::{
    NodeDescriptor, PropertyDataType, PropertyDescriptor, RelationshipEdge,
    RelationshipPropertySet, SchemaSnapshot,
};
pub use type_filter::{select_by_type, TypedProperties, TypedSelection};
