//! Projection of sampled instances onto typed-property selections

use serde::Serialize;

use super::errors::ProjectionError;
use super::values::{NodeInstance, PropertyMap, PropertyValue, RelationshipInstance};
use crate::schema_catalog::schema_types::{NodeDescriptor, PropertyDataType, RelationshipEdge};
use crate::schema_catalog::type_filter::{
    nodes_with_properties_of_type, selection_for, TypedSelection,
};

/// `(label, property, value)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeTriple {
    pub label: String,
    pub property: String,
    pub value: PropertyValue,
}

/// A relationship instance with both endpoint labels attached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationshipRow {
    pub source_label: String,
    pub source: PropertyMap,
    pub rel_type: String,
    pub target_label: String,
    pub target: PropertyMap,
}

/// `(source label, selected source properties, type, target label, selected target properties)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationshipProjection {
    pub source_label: String,
    pub source_properties: PropertyMap,
    pub rel_type: String,
    pub target_label: String,
    pub target_properties: PropertyMap,
}

/// Emit one triple per instance property whose type is `data_type`.
///
/// Properties declared by the schema but absent from an instance are skipped.
/// Instances whose label has no property of that type contribute nothing.
pub fn project_node_instances<S: AsRef<str>>(
    labels: &[S],
    nodes: &[NodeDescriptor],
    data_type: &PropertyDataType,
    instances: &[NodeInstance],
) -> Vec<NodeTriple> {
    let selections = nodes_with_properties_of_type(nodes, labels, data_type);

    let mut triples = Vec::new();
    for instance in instances {
        let Some(props) = selection_for(&selections, &instance.label) else {
            continue;
        };
        for prop in props {
            if let Some(value) = instance.properties.get(prop) {
                triples.push(NodeTriple {
                    label: instance.label.clone(),
                    property: prop.clone(),
                    value: value.clone().canonicalize(),
                });
            }
        }
    }
    triples
}

/// Attach endpoint labels and the relationship type of `triples[i]` to every
/// instance in `instances[i]`.
pub fn combine_rels_with_labels(
    triples: &[RelationshipEdge],
    instances: Vec<Vec<RelationshipInstance>>,
) -> Result<Vec<RelationshipRow>, ProjectionError> {
    if triples.len() != instances.len() {
        return Err(ProjectionError::InvalidArgument {
            message: format!(
                "{} relationship triples but {} instance lists",
                triples.len(),
                instances.len()
            ),
        });
    }

    Ok(triples
        .iter()
        .zip(instances)
        .flat_map(|(triple, batch)| {
            batch.into_iter().map(move |instance| RelationshipRow {
                source_label: triple.source_label.clone(),
                source: instance.source,
                rel_type: triple.rel_type.clone(),
                target_label: triple.target_label.clone(),
                target: instance.target,
            })
        })
        .collect())
}

/// Keep, for each row, the source properties of `source_type` and the target
/// properties of `target_type`.
///
/// Fails with [`ProjectionError::MissingProjection`] when an endpoint label has
/// no property of the requested type at all; callers should check instance
/// shapes against the schema first. Individual properties missing from an
/// instance are simply left out.
pub fn project_relationship_instances<S: AsRef<str>>(
    nodes: &[NodeDescriptor],
    labels: &[S],
    rows: &[RelationshipRow],
    source_type: &PropertyDataType,
    target_type: &PropertyDataType,
) -> Result<Vec<RelationshipProjection>, ProjectionError> {
    let source_selections = nodes_with_properties_of_type(nodes, labels, source_type);
    let target_selections = nodes_with_properties_of_type(nodes, labels, target_type);

    rows.iter()
        .map(|row| {
            let source_properties = select_endpoint(
                &source_selections,
                "source",
                &row.source_label,
                &row.source,
                source_type,
            )?;
            let target_properties = select_endpoint(
                &target_selections,
                "target",
                &row.target_label,
                &row.target,
                target_type,
            )?;

            Ok(RelationshipProjection {
                source_label: row.source_label.clone(),
                source_properties,
                rel_type: row.rel_type.clone(),
                target_label: row.target_label.clone(),
                target_properties,
            })
        })
        .collect()
}

fn select_endpoint(
    selections: &[TypedSelection],
    side: &str,
    label: &str,
    properties: &PropertyMap,
    data_type: &PropertyDataType,
) -> Result<PropertyMap, ProjectionError> {
    let selected =
        selection_for(selections, label).ok_or_else(|| ProjectionError::MissingProjection {
            side: side.to_string(),
            label: label.to_string(),
            data_type: data_type.to_string(),
        })?;

    Ok(selected
        .iter()
        .filter_map(|prop| {
            properties
                .get(prop)
                .map(|v| (prop.clone(), v.clone().canonicalize()))
        })
        .collect())
}

pub fn canonicalize_node_instances(instances: Vec<NodeInstance>) -> Vec<NodeInstance> {
    instances
        .into_iter()
        .map(|mut instance| {
            instance.properties = canonicalize_map(instance.properties);
            instance
        })
        .collect()
}

pub fn canonicalize_relationship_instances(
    instances: Vec<RelationshipInstance>,
) -> Vec<RelationshipInstance> {
    instances
        .into_iter()
        .map(|instance| RelationshipInstance {
            source: canonicalize_map(instance.source),
            rel_type: instance.rel_type,
            target: canonicalize_map(instance.target),
        })
        .collect()
}

fn canonicalize_map(map: PropertyMap) -> PropertyMap {
    map.into_iter().map(|(k, v)| (k, v.canonicalize())).collect()
}

/// Record on each instance the selected property names for its label.
/// Instances whose label has no selection are left untouched.
pub fn add_selected_properties(
    instances: Vec<NodeInstance>,
    selections: &[TypedSelection],
) -> Vec<NodeInstance> {
    instances
        .into_iter()
        .map(|mut instance| {
            if let Some(props) = selection_for(selections, &instance.label) {
                instance.selected_properties = Some(props.to_vec());
            }
            instance
        })
        .collect()
}

/// Entries of `map` whose key is in `keys`
pub fn extract_subdict<S: AsRef<str>>(map: &PropertyMap, keys: &[S]) -> PropertyMap {
    keys.iter()
        .filter_map(|k| {
            map.get_key_value(k.as_ref())
                .map(|(k, v)| (k.clone(), v.clone()))
        })
        .collect()
}
