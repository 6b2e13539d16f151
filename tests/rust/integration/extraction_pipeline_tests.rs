//! Schema and instance extraction through `SchemaExtractor`

use kgschema::graph_source::{GraphSourceError, SchemaExtractor};
use kgschema::instances::{
    canonicalize_node_instances, canonicalize_relationship_instances, combine_rels_with_labels,
    project_node_instances, project_relationship_instances, ProjectionError, PropertyValue,
};
use kgschema::schema_catalog::{load_schema, PropertyDataType, RelationshipEdge};
use kgschema::subgraph::{build_subschema, NeighborhoodPolicy};
use serde_json::{json, Value};

use super::static_executor::{output_rows, row, StaticExecutor};

fn movie_graph() -> StaticExecutor {
    StaticExecutor::new()
        .on(
            "{labels: nodeLabels",
            output_rows(vec![
                json!({"labels": "Person", "properties": [
                    {"property": "name", "type": "STRING"},
                    {"property": "born", "type": "DATE"}
                ]}),
                Value::Null,
                json!({"labels": "Movie", "properties": [
                    {"property": "title", "type": "STRING"},
                    {"property": "released", "type": "INTEGER"}
                ]}),
            ]),
        )
        .on(
            "]->(:",
            output_rows(vec![
                json!("(:Person)-[:ACTED_IN]->(:Movie)"),
                json!("(:Person)-[:REVIEWED]->(:Movie)"),
            ]),
        )
        .on(
            "{type: nodeLabels",
            output_rows(vec![json!({"type": "REVIEWED", "properties": [
                {"property": "rating", "type": "INTEGER"}
            ]})]),
        )
        .on(
            "RETURN DISTINCT label",
            output_rows(vec![json!("Person"), json!("Movie"), json!(42)]),
        )
        .on(
            "MATCH (p:`Person`)",
            vec![
                row(&[("node", json!({"name": "Keanu Reeves", "born": {"year": 1964, "month": 9, "day": 2}}))]),
                row(&[("node", json!({"name": "Carrie-Anne Moss"}))]),
                row(&[("node", json!({"name": "Hugo Weaving", "born": "1960-04-04"}))]),
            ],
        )
        .on(
            "[r:`ACTED_IN`]",
            vec![row(&[
                ("source", json!({"name": "Keanu Reeves", "born": {"year": 1964, "month": 9, "day": 2}})),
                ("rel_type", json!("ACTED_IN")),
                ("target", json!({"title": "The Matrix", "released": 1999})),
            ])],
        )
}

#[tokio::test]
async fn test_save_then_load_gives_same_subschema() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("schema.json");

    let extractor = SchemaExtractor::new(movie_graph());
    let saved = extractor.save_schema(&path).await?;
    assert_eq!(saved.filtered.nodes, 1);

    let loaded = load_schema(&path)?;
    assert_eq!(loaded.filtered.total(), 0);
    assert_eq!(loaded.snapshot, saved.snapshot);

    for policy in [NeighborhoodPolicy::FullVocabulary, NeighborhoodPolicy::MatchedOnly] {
        assert_eq!(
            build_subschema(&["Movies"], &saved.snapshot, 1, policy),
            build_subschema(&["Movies"], &loaded.snapshot, 1, policy)
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_full_schema_string() {
    let extractor = SchemaExtractor::new(movie_graph());
    let text = extractor.build_string_schema_full().await.unwrap();

    assert!(text.contains(
        r#"{labels: "Person", properties: [{property: "name", type: "STRING"}, {property: "born", type: "DATE"}]}"#
    ));
    assert!(text.contains(r#"{type: "REVIEWED", properties: [{property: "rating", type: "INTEGER"}]}"#));
    assert!(text.contains(r#""(:Person)-[:REVIEWED]->(:Movie)""#));
}

#[tokio::test]
async fn test_node_labels_skip_non_strings() {
    let extractor = SchemaExtractor::new(movie_graph());
    assert_eq!(extractor.node_labels().await.unwrap(), vec!["Person", "Movie"]);
}

#[tokio::test]
async fn test_node_instances_to_date_triples() {
    let extractor = SchemaExtractor::new(movie_graph());
    let snapshot = extractor.fetch_snapshot().await.unwrap().snapshot;

    let sampled = extractor.extract_data_values(&["Person"], 10).await.unwrap();
    let instances = canonicalize_node_instances(sampled.into_iter().flatten().collect());
    let triples =
        project_node_instances(&["Person"], &snapshot.nodes, &PropertyDataType::Date, &instances);

    // Carrie-Anne Moss has no `born` and contributes nothing
    let born: Vec<(String, PropertyValue)> = triples
        .into_iter()
        .map(|t| (t.property, t.value))
        .collect();
    assert_eq!(
        born,
        vec![
            ("born".to_string(), PropertyValue::String("1964-09-02".to_string())),
            ("born".to_string(), PropertyValue::String("1960-04-04".to_string())),
        ]
    );
}

#[tokio::test]
async fn test_instance_limit_is_applied() {
    let extractor = SchemaExtractor::new(movie_graph());
    let sampled = extractor.extract_data_values(&["Person"], 1).await.unwrap();
    assert_eq!(sampled[0].len(), 1);
}

#[tokio::test]
async fn test_relationship_instances_projection() {
    let extractor = SchemaExtractor::new(movie_graph());
    let snapshot = extractor.fetch_snapshot().await.unwrap().snapshot;
    let edges = vec![RelationshipEdge::new("Person", "ACTED_IN", "Movie")];

    let batches = extractor
        .extract_multiple_relationships_instances(&edges, 5)
        .await
        .unwrap();
    let batches = batches
        .into_iter()
        .map(canonicalize_relationship_instances)
        .collect();
    let rows = combine_rels_with_labels(&edges, batches).unwrap();

    let projections = project_relationship_instances(
        &snapshot.nodes,
        &["Person", "Movie"],
        &rows,
        &PropertyDataType::Date,
        &PropertyDataType::Integer,
    )
    .unwrap();

    assert_eq!(projections.len(), 1);
    assert_eq!(
        projections[0].source_properties.get("born"),
        Some(&PropertyValue::String("1964-09-02".to_string()))
    );
    assert_eq!(
        projections[0].target_properties.get("released"),
        Some(&PropertyValue::Integer(1999))
    );

    let err = project_relationship_instances(
        &snapshot.nodes,
        &["Person", "Movie"],
        &rows,
        &PropertyDataType::String,
        &PropertyDataType::Date,
    )
    .unwrap_err();
    assert!(matches!(err, ProjectionError::MissingProjection { .. }));
}

#[tokio::test]
async fn test_unknown_query_fails() {
    let extractor = SchemaExtractor::new(movie_graph());
    let err = extractor.node_property_keys("Ghost").await.unwrap_err();
    assert!(matches!(err, GraphSourceError::QueryFailed { .. }));
}
