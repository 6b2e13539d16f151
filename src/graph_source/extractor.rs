//! Schema and instance extraction
//!
//! [`SchemaExtractor`] runs the catalog queries through any [`QueryExecutor`]
//! and turns the returned rows into typed records right away.

use serde_json::Value;
use std::path::Path;

use super::errors::GraphSourceError;
use super::executor::{limit_params, QueryExecutor, QueryParams, Row};
use super::queries::{
    node_data_query, node_instances_query, node_keys_query, relationship_instances_query,
    NODE_LABELS_QUERY, NODE_PROPERTIES_QUERY, RELATIONSHIPS_QUERY, RELATIONSHIP_PROPERTIES_QUERY,
};
use crate::instances::values::{
    property_map_from_json, NodeInstance, PropertyMap, RelationshipInstance,
};
use crate::schema_catalog::record_parser::{
    parse_node_records, parse_relationship_property_records, parse_relationship_strings,
    parse_schema_records, ParsedSchema, RawSchemaRecords,
};
use crate::schema_catalog::schema_store;
use crate::schema_catalog::schema_types::{
    NodeDescriptor, RelationshipEdge, RelationshipPropertySet,
};
use crate::subgraph::assembler::{render_full_schema, render_simplified_schema};

pub struct SchemaExtractor<E: QueryExecutor> {
    executor: E,
}

impl<E: QueryExecutor> SchemaExtractor<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// The three raw schema lists, nulls included
    pub async fn fetch_raw_records(&self) -> Result<RawSchemaRecords, GraphSourceError> {
        log::info!("Fetching node properties...");
        let node_properties = self.output_column(NODE_PROPERTIES_QUERY).await?;
        log::info!("Fetching relationships...");
        let relationships = self.output_column(RELATIONSHIPS_QUERY).await?;
        log::info!("Fetching relationship properties...");
        let relationships_properties = self.output_column(RELATIONSHIP_PROPERTIES_QUERY).await?;

        Ok(RawSchemaRecords {
            node_properties,
            relationships,
            relationships_properties,
        })
    }

    pub async fn fetch_snapshot(&self) -> Result<ParsedSchema, GraphSourceError> {
        let parsed = parse_schema_records(self.fetch_raw_records().await?);
        log::info!(
            "✓ Schema fetched: {} node labels, {} relationships",
            parsed.snapshot.nodes.len(),
            parsed.snapshot.relationships.len()
        );
        Ok(parsed)
    }

    /// Fetch the schema and write it to `path`.
    pub async fn save_schema(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<ParsedSchema, GraphSourceError> {
        let parsed = self.fetch_snapshot().await?;
        schema_store::save_schema(&parsed.snapshot, path)?;
        Ok(parsed)
    }

    /// Fetch the schema and write it to `path` with property names only.
    pub async fn save_schema_simplified(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<ParsedSchema, GraphSourceError> {
        let parsed = self.fetch_snapshot().await?;
        schema_store::save_schema_simplified(&parsed.snapshot, path)?;
        Ok(parsed)
    }

    pub async fn build_string_schema_full(&self) -> Result<String, GraphSourceError> {
        let parsed = self.fetch_snapshot().await?;
        Ok(render_full_schema(&parsed.snapshot))
    }

    pub async fn build_string_schema_simplified(&self) -> Result<String, GraphSourceError> {
        let parsed = self.fetch_snapshot().await?;
        Ok(render_simplified_schema(&parsed.snapshot))
    }

    pub async fn node_labels(&self) -> Result<Vec<String>, GraphSourceError> {
        let labels = self
            .output_column(NODE_LABELS_QUERY)
            .await?
            .into_iter()
            .filter_map(|value| match value {
                Value::String(label) => Some(label),
                other => {
                    log::debug!("Skipping non-string label {}", other);
                    None
                }
            })
            .collect();
        Ok(labels)
    }

    pub async fn node_properties_with_types(
        &self,
    ) -> Result<Vec<NodeDescriptor>, GraphSourceError> {
        let (nodes, _) = parse_node_records(self.output_column(NODE_PROPERTIES_QUERY).await?);
        Ok(nodes)
    }

    pub async fn relationships(&self) -> Result<Vec<String>, GraphSourceError> {
        let (relationships, _) =
            parse_relationship_strings(self.output_column(RELATIONSHIPS_QUERY).await?);
        Ok(relationships)
    }

    pub async fn relationship_properties_with_types(
        &self,
    ) -> Result<Vec<RelationshipPropertySet>, GraphSourceError> {
        let (sets, _) = parse_relationship_property_records(
            self.output_column(RELATIONSHIP_PROPERTIES_QUERY).await?,
        );
        Ok(sets)
    }

    /// Write one part of the schema to `path` as a JSON list.
    pub async fn export_list(
        &self,
        list: SchemaList,
        path: impl AsRef<Path>,
    ) -> Result<usize, GraphSourceError> {
        let written = match list {
            SchemaList::NodeNames => {
                let labels = self.node_labels().await?;
                schema_store::write_json(&labels, path)?;
                labels.len()
            }
            SchemaList::NodeProperties => {
                let nodes = self.node_properties_with_types().await?;
                schema_store::write_json(&nodes, path)?;
                nodes.len()
            }
            SchemaList::Relationships => {
                let relationships = self.relationships().await?;
                schema_store::write_json(&relationships, path)?;
                relationships.len()
            }
            SchemaList::RelationshipProperties => {
                let sets = self.relationship_properties_with_types().await?;
                schema_store::write_json(&sets, path)?;
                sets.len()
            }
        };
        log::info!("Exported {} {} entries", written, list.as_str());
        Ok(written)
    }

    /// Property keys of one node carrying `label`; empty when there is none.
    pub async fn node_property_keys(&self, label: &str) -> Result<Vec<String>, GraphSourceError> {
        let rows = self
            .executor
            .execute(&node_keys_query(label), &QueryParams::new())
            .await?;

        let Some(mut row) = rows.into_iter().next() else {
            return Ok(Vec::new());
        };

        match take_column(&mut row, "keys")? {
            Value::Array(keys) => Ok(keys
                .into_iter()
                .filter_map(|k| k.as_str().map(str::to_string))
                .collect()),
            other => Err(GraphSourceError::unexpected(format!(
                "expected a list of keys, got {}",
                other
            ))),
        }
    }

    /// All values of every property of `label`, one map per node.
    ///
    /// The keys come from a single node, as in [`Self::node_property_keys`]; a
    /// node lacking one of them maps it to `Null`.
    pub async fn upload_graph_data(
        &self,
        label: &str,
    ) -> Result<Vec<PropertyMap>, GraphSourceError> {
        let keys = self.node_property_keys(label).await?;
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let rows = self
            .executor
            .execute(&node_data_query(label, &keys), &QueryParams::new())
            .await?;
        let data: Vec<PropertyMap> = rows
            .into_iter()
            .map(|row| property_map_from_json(Value::Object(row)))
            .collect();

        log::info!(
            "Read {} {} nodes with {} properties",
            data.len(),
            label,
            keys.len()
        );
        Ok(data)
    }

    /// Up to `limit` instances for each label, one list per label in order.
    pub async fn extract_data_values<S: AsRef<str> + Sync>(
        &self,
        labels: &[S],
        limit: usize,
    ) -> Result<Vec<Vec<NodeInstance>>, GraphSourceError> {
        let params = limit_params(limit);
        let mut all = Vec::with_capacity(labels.len());

        for label in labels {
            let label = label.as_ref();
            let rows = self
                .executor
                .execute(&node_instances_query(label), &params)
                .await?;

            let instances = rows
                .into_iter()
                .map(|mut row| {
                    let properties = property_map_from_json(take_column(&mut row, "node")?);
                    Ok(NodeInstance::new(label, properties))
                })
                .collect::<Result<Vec<_>, GraphSourceError>>()?;

            log::debug!("Sampled {} instances of {}", instances.len(), label);
            all.push(instances);
        }

        Ok(all)
    }

    /// Up to `limit` instances of one `(source)-[type]->(target)` pattern
    pub async fn extract_relationship_instances(
        &self,
        edge: &RelationshipEdge,
        limit: usize,
    ) -> Result<Vec<RelationshipInstance>, GraphSourceError> {
        let query =
            relationship_instances_query(&edge.source_label, &edge.rel_type, &edge.target_label);
        let rows = self.executor.execute(&query, &limit_params(limit)).await?;

        let instances = rows
            .into_iter()
            .map(|mut row| {
                let source = property_map_from_json(take_column(&mut row, "source")?);
                let rel_type = match take_column(&mut row, "rel_type")? {
                    Value::String(t) => t,
                    _ => edge.rel_type.clone(),
                };
                let target = property_map_from_json(take_column(&mut row, "target")?);
                Ok(RelationshipInstance {
                    source,
                    rel_type,
                    target,
                })
            })
            .collect::<Result<Vec<_>, GraphSourceError>>()?;

        log::debug!("Sampled {} instances of {}", instances.len(), edge);
        Ok(instances)
    }

    pub async fn extract_multiple_relationships_instances(
        &self,
        edges: &[RelationshipEdge],
        limit: usize,
    ) -> Result<Vec<Vec<RelationshipInstance>>, GraphSourceError> {
        let mut all = Vec::with_capacity(edges.len());
        for edge in edges {
            all.push(self.extract_relationship_instances(edge, limit).await?);
        }
        Ok(all)
    }

    async fn output_column(&self, query: &str) -> Result<Vec<Value>, GraphSourceError> {
        let rows = self.executor.execute(query, &QueryParams::new()).await?;
        rows.into_iter()
            .map(|mut row| take_column(&mut row, "output"))
            .collect()
    }
}

/// A single schema list exported on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaList {
    NodeNames,
    NodeProperties,
    Relationships,
    RelationshipProperties,
}

impl SchemaList {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaList::NodeNames => "node name",
            SchemaList::NodeProperties => "node property",
            SchemaList::Relationships => "relationship",
            SchemaList::RelationshipProperties => "relationship property",
        }
    }
}

fn take_column(row: &mut Row, column: &str) -> Result<Value, GraphSourceError> {
    row.remove(column)
        .ok_or_else(|| GraphSourceError::unexpected(format!("missing column '{}'", column)))
}
