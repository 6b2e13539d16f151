//! Cypher used to read the schema and sample instances.
//!
//! The schema queries rely on `apoc.meta.data()` and each return a single
//! `output` column.

pub const NODE_PROPERTIES_QUERY: &str = r#"
CALL apoc.meta.data()
YIELD label, other, elementType, type, property
WHERE NOT type = "RELATIONSHIP" AND elementType = "node"
WITH label AS nodeLabels, collect({property:property, type:type}) AS properties
RETURN {labels: nodeLabels, properties: properties} AS output
"#;

pub const RELATIONSHIPS_QUERY: &str = r#"
CALL apoc.meta.data()
YIELD label, other, elementType, type, property
WHERE type = "RELATIONSHIP" AND elementType = "node"
RETURN "(:" + label + ")-[:" + property + "]->(:" + toString(other[0]) + ")" AS output
"#;

pub const RELATIONSHIP_PROPERTIES_QUERY: &str = r#"
CALL apoc.meta.data()
YIELD label, other, elementType, type, property
WHERE NOT type = "RELATIONSHIP" AND elementType = "relationship"
WITH label AS nodeLabels, collect({property:property, type:type}) AS properties
RETURN {type: nodeLabels, properties: properties} AS output
"#;

pub const NODE_LABELS_QUERY: &str = r#"
CALL apoc.meta.data()
YIELD label, elementType, type
WHERE NOT type = "RELATIONSHIP" AND elementType = "node"
RETURN DISTINCT label AS output
"#;

/// Quote a label or relationship type for interpolation into Cypher.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

pub fn node_keys_query(label: &str) -> String {
    format!(
        "MATCH (n:{}) RETURN keys(n) AS keys LIMIT 1",
        quote_identifier(label)
    )
}

/// Expects a `limit` parameter
pub fn node_instances_query(label: &str) -> String {
    format!(
        "MATCH (p:{}) WITH p LIMIT $limit RETURN properties(p) AS node",
        quote_identifier(label)
    )
}

/// Every node of `label`, one column per key named after the key
pub fn node_data_query<S: AsRef<str>>(label: &str, keys: &[S]) -> String {
    let columns: Vec<String> = keys
        .iter()
        .map(|key| {
            let key = quote_identifier(key.as_ref());
            format!("n.{} AS {}", key, key)
        })
        .collect();
    format!(
        "MATCH (n:{}) RETURN {}",
        quote_identifier(label),
        columns.join(", ")
    )
}

/// Expects a `limit` parameter
pub fn relationship_instances_query(source: &str, rel_type: &str, target: &str) -> String {
    format!(
        "MATCH (a:{})-[r:{}]->(b:{}) \
         RETURN properties(a) AS source, type(r) AS rel_type, properties(b) AS target \
         LIMIT $limit",
        quote_identifier(source),
        quote_identifier(rel_type),
        quote_identifier(target)
    )
}
