//! Schema file persistence
//!
//! The cached schema file is JSON shaped as
//! `{node_properties: [...], relationships: [...], relationships_properties: [...]}`.
//! Loading goes through the record parser, so a hand-edited or partial file
//! with `null` entries loads the same way a live extraction does.
//! Saving is deterministic: list order is preserved and map keys keep their
//! declaration order.
//!
//! A simplified file lists property names only. Loading it back gives every
//! property the placeholder type `UNKNOWN`.

use serde::Serialize;
use std::fs;
use std::path::Path;

use super::errors::SchemaCatalogError;
use super::record_parser::{parse_schema_records, ParsedSchema, RawSchemaRecords};
use super::schema_types::{
    NodeDescriptor, PropertyDescriptor, RelationshipPropertySet, SchemaSnapshot,
};

#[derive(Serialize)]
struct SchemaFile<'a> {
    node_properties: &'a [NodeDescriptor],
    relationships: &'a [String],
    relationships_properties: &'a [RelationshipPropertySet],
}

#[derive(Serialize)]
struct SimplifiedSchemaFile<'a> {
    node_properties: Vec<NamedNode<'a>>,
    relationships: &'a [String],
    relationships_properties: Vec<NamedRelationshipProperties<'a>>,
}

#[derive(Serialize)]
struct NamedNode<'a> {
    labels: &'a str,
    properties: Vec<&'a str>,
}

#[derive(Serialize)]
struct NamedRelationshipProperties<'a> {
    #[serde(rename = "type")]
    rel_type: &'a str,
    properties: Vec<&'a str>,
}

fn property_names(properties: &[PropertyDescriptor]) -> Vec<&str> {
    properties.iter().map(|p| p.name.as_str()).collect()
}

/// Load a schema file into a snapshot, dropping null and unreadable entries.
pub fn load_schema(path: impl AsRef<Path>) -> Result<ParsedSchema, SchemaCatalogError> {
    let raw: RawSchemaRecords = read_json(path)?;
    Ok(parse_schema_records(raw))
}

/// Write a snapshot to a schema file.
pub fn save_schema(
    snapshot: &SchemaSnapshot,
    path: impl AsRef<Path>,
) -> Result<(), SchemaCatalogError> {
    let file = SchemaFile {
        node_properties: &snapshot.nodes,
        relationships: &snapshot.relationships,
        relationships_properties: &snapshot.relationship_properties,
    };
    write_json(&file, path)
}

/// Write a snapshot to a schema file with property names only.
pub fn save_schema_simplified(
    snapshot: &SchemaSnapshot,
    path: impl AsRef<Path>,
) -> Result<(), SchemaCatalogError> {
    let file = SimplifiedSchemaFile {
        node_properties: snapshot
            .nodes
            .iter()
            .map(|n| NamedNode {
                labels: &n.label,
                properties: property_names(&n.properties),
            })
            .collect(),
        relationships: &snapshot.relationships,
        relationships_properties: snapshot
            .relationship_properties
            .iter()
            .map(|r| NamedRelationshipProperties {
                rel_type: &r.rel_type,
                properties: property_names(&r.properties),
            })
            .collect(),
    };
    write_json(&file, path)
}

pub fn read_json<T: serde::de::DeserializeOwned>(
    path: impl AsRef<Path>,
) -> Result<T, SchemaCatalogError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| SchemaCatalogError::SchemaFileRead {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| SchemaCatalogError::SchemaFileParse {
        path: path.display().to_string(),
        error: e.to_string(),
    })
}

pub fn write_json<T: Serialize + ?Sized>(
    value: &T,
    path: impl AsRef<Path>,
) -> Result<(), SchemaCatalogError> {
    let path = path.as_ref();
    let content =
        serde_json::to_string_pretty(value).map_err(|e| SchemaCatalogError::SchemaFileWrite {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
    fs::write(path, content).map_err(|e| SchemaCatalogError::SchemaFileWrite {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
