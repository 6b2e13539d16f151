//! Typed selection, projection and pair sampling over in-memory instances

use kgschema::instances::{
    add_selected_properties, canonicalize_node_instances, project_node_instances,
    random_properties, NodeInstance, PropertyMap, PropertyValue, UsedPairs,
};
use kgschema::schema_catalog::type_filter::{
    nodes_with_properties_of_type, relationships_with_properties_of_type,
};
use kgschema::schema_catalog::{
    NodeDescriptor, PropertyDataType, PropertyDescriptor, RelationshipPropertySet,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

fn nodes() -> Vec<NodeDescriptor> {
    vec![
        NodeDescriptor::new(
            "Person",
            vec![
                PropertyDescriptor::new("name", PropertyDataType::String),
                PropertyDescriptor::new("nickname", PropertyDataType::String),
                PropertyDescriptor::new("born", PropertyDataType::Date),
            ],
        ),
        NodeDescriptor::new(
            "Movie",
            vec![
                PropertyDescriptor::new("title", PropertyDataType::String),
                PropertyDescriptor::new("released", PropertyDataType::Integer),
            ],
        ),
    ]
}

fn person(name: &str, nickname: &str, born: serde_json::Value) -> NodeInstance {
    let mut properties = PropertyMap::new();
    properties.insert("name".to_string(), PropertyValue::String(name.to_string()));
    properties.insert(
        "nickname".to_string(),
        PropertyValue::String(nickname.to_string()),
    );
    properties.insert("born".to_string(), PropertyValue::from_json(born));
    NodeInstance::new("Person", properties)
}

fn people() -> Vec<NodeInstance> {
    vec![
        person("Keanu Reeves", "Keanu", json!({"year": 1964, "month": 9, "day": 2})),
        person("Carrie-Anne Moss", "Carrie", json!({"year": 1967, "month": 8, "day": 21})),
        person("Laurence Fishburne", "Larry", json!({"year": 1961, "month": 7, "day": 30})),
    ]
}

#[test]
fn test_selection_follows_schema_order() {
    let selections =
        nodes_with_properties_of_type(&nodes(), &["Movie", "Person"], &PropertyDataType::String);
    assert_eq!(selections.len(), 2);
    assert_eq!(selections[0].key, "Person");
    assert_eq!(selections[0].selected_properties, vec!["name", "nickname"]);
    assert_eq!(selections[1].selected_properties, vec!["title"]);
}

#[test]
fn test_relationship_selection_skips_types_without_match() {
    let rel_props = vec![
        RelationshipPropertySet::new(
            "ACTED_IN",
            vec![PropertyDescriptor::new("roles", PropertyDataType::from("LIST"))],
        ),
        RelationshipPropertySet::new(
            "REVIEWED",
            vec![PropertyDescriptor::new("rating", PropertyDataType::Integer)],
        ),
    ];
    let selections = relationships_with_properties_of_type(
        &rel_props,
        &["ACTED_IN", "REVIEWED"],
        &PropertyDataType::Integer,
    );
    assert_eq!(selections.len(), 1);
    assert_eq!(selections[0].key, "REVIEWED");
}

#[test]
fn test_date_projection_is_canonical() {
    let instances = canonicalize_node_instances(people());
    let triples =
        project_node_instances(&["Person"], &nodes(), &PropertyDataType::Date, &instances);

    let born: Vec<String> = triples.iter().map(|t| t.value.to_string()).collect();
    assert_eq!(born, vec!["1964-09-02", "1967-08-21", "1961-07-30"]);
    assert!(triples.iter().all(|t| !t.value.is_temporal()));
}

#[test]
fn test_annotated_instances_serialize_selection() {
    let selections =
        nodes_with_properties_of_type(&nodes(), &["Person"], &PropertyDataType::Date);
    let annotated = add_selected_properties(people(), &selections);

    let value = serde_json::to_value(&annotated[0]).unwrap();
    assert_eq!(value["selected_properties"], json!(["born"]));
    assert_eq!(value["properties"]["born"], json!("1964-09-02"));
}

#[test]
fn test_sampling_draws_distinct_pairs_until_exhausted() {
    let triples =
        project_node_instances(&["Person"], &nodes(), &PropertyDataType::String, &people());
    // 6 triples of one label give 15 pairs; sampling stops once fewer than 5 remain
    assert_eq!(triples.len(), 6);

    let mut rng = StdRng::seed_from_u64(42);
    let mut used = UsedPairs::new();
    let mut drawn = Vec::new();
    while let Some(pair) = random_properties(&triples, &mut used, &mut rng) {
        assert_eq!(pair.label, "Person");
        assert!(!drawn.contains(&pair));
        drawn.push(pair);
    }
    assert_eq!(drawn.len(), 11);
    assert_eq!(used.len(), 11);
}
