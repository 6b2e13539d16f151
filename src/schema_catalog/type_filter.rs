//! Typed-property selection
//!
//! Picks, for a chosen set of labels (or relationship types), the property
//! names whose data type is exactly the requested one. Works the same way for
//! node descriptors and relationship property sets through [`TypedProperties`].

use serde::{Deserialize, Serialize};

use super::schema_types::{
    NodeDescriptor, PropertyDataType, PropertyDescriptor, RelationshipPropertySet,
};

/// Anything keyed by a label or type that owns an ordered property list.
pub trait TypedProperties {
    fn key(&self) -> &str;
    fn properties(&self) -> &[PropertyDescriptor];
}

impl TypedProperties for NodeDescriptor {
    fn key(&self) -> &str {
        &self.label
    }

    fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }
}

impl TypedProperties for RelationshipPropertySet {
    fn key(&self) -> &str {
        &self.rel_type
    }

    fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }
}

/// Properties of one label/type that have the requested data type. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedSelection {
    pub key: String,
    pub selected_properties: Vec<String>,
}

/// Select, per descriptor whose key is in `selected_keys`, the property names of
/// type `data_type`. Descriptors with no such property are left out entirely.
pub fn select_by_type<D, S>(
    descriptors: &[D],
    selected_keys: &[S],
    data_type: &PropertyDataType,
) -> Vec<TypedSelection>
where
    D: TypedProperties,
    S: AsRef<str>,
{
    descriptors
        .iter()
        .filter(|d| selected_keys.iter().any(|k| k.as_ref() == d.key()))
        .filter_map(|d| {
            let selected_properties: Vec<String> = d
                .properties()
                .iter()
                .filter(|p| &p.data_type == data_type)
                .map(|p| p.name.clone())
                .collect();

            if selected_properties.is_empty() {
                None
            } else {
                Some(TypedSelection {
                    key: d.key().to_string(),
                    selected_properties,
                })
            }
        })
        .collect()
}

pub fn nodes_with_properties_of_type<S: AsRef<str>>(
    nodes: &[NodeDescriptor],
    selected_labels: &[S],
    data_type: &PropertyDataType,
) -> Vec<TypedSelection> {
    select_by_type(nodes, selected_labels, data_type)
}

pub fn relationships_with_properties_of_type<S: AsRef<str>>(
    relationship_properties: &[RelationshipPropertySet],
    selected_types: &[S],
    data_type: &PropertyDataType,
) -> Vec<TypedSelection> {
    select_by_type(relationship_properties, selected_types, data_type)
}

/// Selected property names for `key`, if any were selected
pub fn selection_for<'a>(selections: &'a [TypedSelection], key: &str) -> Option<&'a [String]> {
    selections
        .iter()
        .find(|s| s.key == key)
        .map(|s| s.selected_properties.as_slice())
}
