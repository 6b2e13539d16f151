//! Schema record parser
//!
//! Converts the untyped rows returned by the schema source (or read back from
//! a schema file) into a [`SchemaSnapshot`].
//!
//! The source returns three lists:
//! - node records: `{labels: "Person", properties: [{property: "name", type: "STRING"}]}`
//! - relationship strings: `"(:Person)-[:WORKS_AT]->(:Company)"`
//! - relationship property records: `{type: "WORKS_AT", properties: [...]}`
//!
//! Any list may contain `null` entries. Those are dropped and counted, with
//! one warning per list; they never fail the parse. Rows that are not null but
//! still cannot be read as a record are dropped the same way, including
//! relationship strings that yield no edge.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::SchemaCatalogError;
use super::pattern_grammar::parse_edges;
use super::schema_types::{
    NodeDescriptor, PropertyDataType, PropertyDescriptor, RelationshipPropertySet, SchemaSnapshot,
};

/// Type assigned to properties listed by name only (simplified schema files)
pub const UNTYPED_PROPERTY: &str = "UNKNOWN";

/// The three raw lists, as stored in a schema file or returned by extraction queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSchemaRecords {
    #[serde(default)]
    pub node_properties: Vec<Value>,
    #[serde(default)]
    pub relationships: Vec<Value>,
    #[serde(default)]
    pub relationships_properties: Vec<Value>,
}

/// Number of entries dropped from each list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilteredCounts {
    pub nodes: usize,
    pub relationships: usize,
    pub relationship_properties: usize,
}

impl FilteredCounts {
    pub fn total(&self) -> usize {
        self.nodes + self.relationships + self.relationship_properties
    }
}

#[derive(Debug, Clone)]
pub struct ParsedSchema {
    pub snapshot: SchemaSnapshot,
    pub filtered: FilteredCounts,
}

#[derive(Deserialize)]
struct RawNodeRecord {
    labels: String,
    #[serde(default)]
    properties: Vec<RawProperty>,
}

#[derive(Deserialize)]
struct RawRelationshipPropertyRecord {
    #[serde(rename = "type")]
    rel_type: String,
    #[serde(default)]
    properties: Vec<RawProperty>,
}

/// A property is either `{property, type}` or, in simplified schemas, a bare name.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawProperty {
    Typed {
        property: String,
        #[serde(rename = "type")]
        data_type: String,
    },
    Name(String),
}

impl From<RawProperty> for PropertyDescriptor {
    fn from(raw: RawProperty) -> Self {
        match raw {
            RawProperty::Typed {
                property,
                data_type,
            } => PropertyDescriptor::new(property, PropertyDataType::from(data_type)),
            RawProperty::Name(name) => {
                PropertyDescriptor::new(name, PropertyDataType::from(UNTYPED_PROPERTY))
            }
        }
    }
}

/// Parse all three raw lists into a snapshot.
pub fn parse_schema_records(raw: RawSchemaRecords) -> ParsedSchema {
    let (nodes, filtered_nodes) = parse_node_records(raw.node_properties);
    let (relationships, filtered_rels) = parse_relationship_strings(raw.relationships);
    let (relationship_properties, filtered_rel_props) =
        parse_relationship_property_records(raw.relationships_properties);

    let filtered = FilteredCounts {
        nodes: filtered_nodes,
        relationships: filtered_rels,
        relationship_properties: filtered_rel_props,
    };

    log::debug!(
        "Parsed schema: {} nodes, {} relationships, {} relationship property sets ({} entries filtered)",
        nodes.len(),
        relationships.len(),
        relationship_properties.len(),
        filtered.total()
    );

    ParsedSchema {
        snapshot: SchemaSnapshot::new(nodes, relationships, relationship_properties),
        filtered,
    }
}

pub fn parse_node_records(rows: Vec<Value>) -> (Vec<NodeDescriptor>, usize) {
    filter_records("node", rows, |row| {
        let record: RawNodeRecord = serde_json::from_value(row)
            .map_err(|e| SchemaCatalogError::invalid_record("node", e.to_string()))?;
        Ok(NodeDescriptor::new(
            record.labels,
            record.properties.into_iter().map(Into::into).collect(),
        ))
    })
}

/// Relationship strings are kept verbatim when they hold at least one edge.
pub fn parse_relationship_strings(rows: Vec<Value>) -> (Vec<String>, usize) {
    filter_records("relationship", rows, |row| match row {
        Value::String(s) if !parse_edges(&s).is_empty() => Ok(s),
        Value::String(s) => Err(SchemaCatalogError::invalid_record(
            "relationship",
            format!("no edge in pattern string {:?}", s),
        )),
        other => Err(SchemaCatalogError::invalid_record(
            "relationship",
            format!("expected a pattern string, got {}", other),
        )),
    })
}

pub fn parse_relationship_property_records(
    rows: Vec<Value>,
) -> (Vec<RelationshipPropertySet>, usize) {
    filter_records("relationship property", rows, |row| {
        let record: RawRelationshipPropertyRecord = serde_json::from_value(row).map_err(|e| {
            SchemaCatalogError::invalid_record("relationship property", e.to_string())
        })?;
        Ok(RelationshipPropertySet::new(
            record.rel_type,
            record.properties.into_iter().map(Into::into).collect(),
        ))
    })
}

fn filter_records<T>(
    kind: &str,
    rows: Vec<Value>,
    convert: impl Fn(Value) -> Result<T, SchemaCatalogError>,
) -> (Vec<T>, usize) {
    let mut records = Vec::with_capacity(rows.len());
    let mut nulls = 0;
    let mut invalid = 0;

    for row in rows {
        if row.is_null() {
            nulls += 1;
            continue;
        }
        match convert(row) {
            Ok(record) => records.push(record),
            Err(e) => {
                log::warn!("Dropping record: {}", e);
                invalid += 1;
            }
        }
    }

    if nulls > 0 {
        log::warn!("There are {} null entries in the {} list.", nulls, kind);
    }

    (records, nulls + invalid)
}
