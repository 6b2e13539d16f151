//! Typed schema model
//!
//! These are the shapes the rest of the crate works with once raw rows from
//! the graph source have been converted at the boundary. JSON field names
//! follow the APOC query output (`labels`, `property`, `type`) so a snapshot
//! serializes to the same schema file the extraction queries produce.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::pattern_grammar;

/// Scalar data type of a property, as reported by `apoc.meta.data()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyDataType {
    String,
    Integer,
    Boolean,
    Date,
    DateTime,
    Float,
    /// Any other APOC type name (`LIST`, `POINT`, `LOCAL_DATE_TIME`, ...), kept verbatim
    Other(String),
}

impl PropertyDataType {
    pub fn as_str(&self) -> &str {
        match self {
            PropertyDataType::String => "STRING",
            PropertyDataType::Integer => "INTEGER",
            PropertyDataType::Boolean => "BOOLEAN",
            PropertyDataType::Date => "DATE",
            PropertyDataType::DateTime => "DATE_TIME",
            PropertyDataType::Float => "FLOAT",
            PropertyDataType::Other(name) => name.as_str(),
        }
    }
}

impl From<&str> for PropertyDataType {
    fn from(name: &str) -> Self {
        match name {
            "STRING" => PropertyDataType::String,
            "INTEGER" => PropertyDataType::Integer,
            "BOOLEAN" => PropertyDataType::Boolean,
            "DATE" => PropertyDataType::Date,
            "DATE_TIME" => PropertyDataType::DateTime,
            "FLOAT" => PropertyDataType::Float,
            other => PropertyDataType::Other(other.to_string()),
        }
    }
}

impl From<String> for PropertyDataType {
    fn from(name: String) -> Self {
        PropertyDataType::from(name.as_str())
    }
}

impl From<PropertyDataType> for String {
    fn from(data_type: PropertyDataType) -> Self {
        data_type.as_str().to_string()
    }
}

impl FromStr for PropertyDataType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PropertyDataType::from(s))
    }
}

impl fmt::Display for PropertyDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    #[serde(rename = "property")]
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: PropertyDataType,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>, data_type: PropertyDataType) -> Self {
        PropertyDescriptor {
            name: name.into(),
            data_type,
        }
    }
}

impl fmt::Display for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{property: {}, type: {}}}",
            Quoted(&self.name),
            Quoted(self.data_type.as_str())
        )
    }
}

/// A node label together with its typed properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    #[serde(rename = "labels")]
    pub label: String,
    pub properties: Vec<PropertyDescriptor>,
}

impl NodeDescriptor {
    pub fn new(label: impl Into<String>, properties: Vec<PropertyDescriptor>) -> Self {
        NodeDescriptor {
            label: label.into(),
            properties,
        }
    }
}

impl fmt::Display for NodeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{labels: {}, properties: ", Quoted(&self.label))?;
        write_list(f, &self.properties)?;
        f.write_str("}")
    }
}

/// One `(:Source)-[:TYPE]->(:Target)` pattern.
///
/// Several edges may share a relationship type with different endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationshipEdge {
    pub source_label: String,
    pub rel_type: String,
    pub target_label: String,
}

impl RelationshipEdge {
    pub fn new(
        source_label: impl Into<String>,
        rel_type: impl Into<String>,
        target_label: impl Into<String>,
    ) -> Self {
        RelationshipEdge {
            source_label: source_label.into(),
            rel_type: rel_type.into(),
            target_label: target_label.into(),
        }
    }

    /// True if either endpoint carries `label`
    pub fn touches(&self, label: &str) -> bool {
        self.source_label == label || self.target_label == label
    }
}

impl fmt::Display for RelationshipEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&pattern_grammar::render_edge(self))
    }
}

/// Properties attached to a relationship type, shared by every edge of that type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipPropertySet {
    #[serde(rename = "type")]
    pub rel_type: String,
    pub properties: Vec<PropertyDescriptor>,
}

impl RelationshipPropertySet {
    pub fn new(rel_type: impl Into<String>, properties: Vec<PropertyDescriptor>) -> Self {
        RelationshipPropertySet {
            rel_type: rel_type.into(),
            properties,
        }
    }
}

impl fmt::Display for RelationshipPropertySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{type: {}, properties: ", Quoted(&self.rel_type))?;
        write_list(f, &self.properties)?;
        f.write_str("}")
    }
}

/// In-memory copy of one schema extraction.
///
/// `relationships` keeps the pattern strings exactly as the schema source
/// returned them, minus those that yield no edge; `edges` is their parsed form.
/// Labels referenced by an edge need not exist in `nodes`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaSnapshot {
    pub nodes: Vec<NodeDescriptor>,
    pub relationships: Vec<String>,
    pub edges: Vec<RelationshipEdge>,
    pub relationship_properties: Vec<RelationshipPropertySet>,
}

impl SchemaSnapshot {
    /// Build a snapshot, parsing `relationships` into edges.
    /// Strings that do not follow the edge grammar are dropped.
    pub fn new(
        nodes: Vec<NodeDescriptor>,
        relationships: Vec<String>,
        relationship_properties: Vec<RelationshipPropertySet>,
    ) -> Self {
        let mut edges = Vec::with_capacity(relationships.len());
        let relationships = relationships
            .into_iter()
            .filter(|raw| {
                let parsed = pattern_grammar::parse_edges(raw);
                let has_edge = !parsed.is_empty();
                edges.extend(parsed);
                has_edge
            })
            .collect();

        SchemaSnapshot {
            nodes,
            relationships,
            edges,
            relationship_properties,
        }
    }

    /// All node labels, in schema order
    pub fn node_labels(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.label.as_str()).collect()
    }

    pub fn node(&self, label: &str) -> Option<&NodeDescriptor> {
        self.nodes.iter().find(|n| n.label == label)
    }

    pub fn relationship_property_set(&self, rel_type: &str) -> Option<&RelationshipPropertySet> {
        self.relationship_properties
            .iter()
            .find(|r| r.rel_type == rel_type)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.relationships.is_empty()
    }
}

/// A string rendered as a double-quoted literal with JSON escapes
pub struct Quoted<'a>(pub &'a str);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serde_json::Value::from(self.0))
    }
}

/// Write `[a, b, c]` using each item's `Display`.
pub(crate) fn write_list<I>(f: &mut fmt::Formatter<'_>, items: I) -> fmt::Result
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    f.write_str("[")?;
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str("]")
}
