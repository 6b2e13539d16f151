//! Subschema assembly over a parsed movie schema

use kgschema::matching::match_entities;
use kgschema::schema_catalog::{
    parse_schema_records, ParsedSchema, RawSchemaRecords, SchemaSnapshot,
};
use kgschema::subgraph::{build_subschema, subgraph_schema, NeighborhoodPolicy};
use serde_json::json;
use test_case::test_case;

fn movie_schema() -> ParsedSchema {
    let raw: RawSchemaRecords = serde_json::from_value(json!({
        "node_properties": [
            {"labels": "Movie", "properties": [
                {"property": "title", "type": "STRING"},
                {"property": "released", "type": "INTEGER"}
            ]},
            {"labels": "Person", "properties": [
                {"property": "name", "type": "STRING"},
                {"property": "born", "type": "DATE"}
            ]},
            {"labels": "Genre", "properties": [{"property": "name", "type": "STRING"}]},
            null
        ],
        "relationships": [
            "(:Person)-[:ACTED_IN]->(:Movie)",
            "(:Person)-[:DIRECTED]->(:Movie)",
            "(:Movie)-[:IN_GENRE]->(:Genre)",
            "not a pattern",
            null
        ],
        "relationships_properties": [
            {"type": "ACTED_IN", "properties": [{"property": "roles", "type": "LIST"}]}
        ]
    }))
    .unwrap();
    parse_schema_records(raw)
}

#[test]
fn test_nulls_are_filtered_and_counted() {
    let parsed = movie_schema();
    assert_eq!(parsed.filtered.nodes, 1);
    // The null and the malformed pattern
    assert_eq!(parsed.filtered.relationships, 2);
    assert_eq!(parsed.filtered.relationship_properties, 0);
    assert_eq!(parsed.snapshot.node_labels(), vec!["Movie", "Person", "Genre"]);

    assert_eq!(parsed.snapshot.relationships.len(), 3);
    assert_eq!(parsed.snapshot.edges.len(), 3);
}

#[test_case(NeighborhoodPolicy::FullVocabulary ; "full vocabulary")]
#[test_case(NeighborhoodPolicy::MatchedOnly ; "matched only")]
fn test_malformed_relationship_never_rendered(policy: NeighborhoodPolicy) {
    let snapshot = SchemaSnapshot::new(
        vec![],
        vec![
            "(:Person)-[:KNOWS]->(:Person)".to_string(),
            "garbage Person string".to_string(),
        ],
        vec![],
    );
    let subgraph = subgraph_schema(&["Person"], &snapshot, 0, policy);
    assert_eq!(subgraph.relationships, vec!["(:Person)-[:KNOWS]->(:Person)"]);
    assert!(!subgraph.to_string().contains("garbage"));
}

#[test_case(&["Movies"], 0 ; "exact distance")]
#[test_case(&["Movies"], 1 ; "plural")]
#[test_case(&["Persn", "genres"], 2 ; "two entities")]
#[test_case(&["Studio"], 3 ; "no label nearby")]
fn test_subschema_nodes_are_close_to_some_entity(entities: &[&str], max_distance: usize) {
    let snapshot = movie_schema().snapshot;
    let subgraph = subgraph_schema(
        entities,
        &snapshot,
        max_distance,
        NeighborhoodPolicy::FullVocabulary,
    );

    for node in &subgraph.nodes {
        assert!(
            entities
                .iter()
                .any(|e| !match_entities(e, &[node.label.as_str()], max_distance).is_empty()),
            "{} is not within {} of {:?}",
            node.label,
            max_distance,
            entities
        );
    }
}

#[test]
fn test_larger_distance_only_adds_nodes() {
    let snapshot = movie_schema().snapshot;
    for distance in 0..5 {
        let narrow = subgraph_schema(&["Movi"], &snapshot, distance, NeighborhoodPolicy::MatchedOnly);
        let wide =
            subgraph_schema(&["Movi"], &snapshot, distance + 1, NeighborhoodPolicy::MatchedOnly);
        for node in &narrow.nodes {
            assert!(wide.nodes.contains(node));
        }
    }
}

#[test]
fn test_full_vocabulary_without_matches() {
    let snapshot = movie_schema().snapshot;
    let text = build_subschema(&["Spaceship"], &snapshot, 1, NeighborhoodPolicy::FullVocabulary);

    assert!(text.starts_with("Node properties are the following:\n[]\n"));
    assert!(text.contains(r#""(:Movie)-[:IN_GENRE]->(:Genre)""#));
    assert!(text.contains(r#"{type: "ACTED_IN", properties: [{property: "roles", type: "LIST"}]}"#));
}

#[test]
fn test_matched_only_keeps_local_relationships() {
    let snapshot = movie_schema().snapshot;
    let subgraph = subgraph_schema(&["Genre"], &snapshot, 0, NeighborhoodPolicy::MatchedOnly);

    assert_eq!(subgraph.nodes.len(), 1);
    assert_eq!(subgraph.relationships, vec!["(:Movie)-[:IN_GENRE]->(:Genre)"]);
    // IN_GENRE carries no properties
    assert!(subgraph.relationship_properties.is_empty());
}

#[test]
fn test_rendered_subschema() {
    let snapshot = movie_schema().snapshot;
    let text = build_subschema(&["Person"], &snapshot, 0, NeighborhoodPolicy::MatchedOnly);

    assert_eq!(
        text,
        concat!(
            "Node properties are the following:\n",
            r#"[{labels: "Person", properties: [{property: "name", type: "STRING"}, {property: "born", type: "DATE"}]}]"#,
            "\nThe relations are the following:\n",
            r#"["(:Person)-[:ACTED_IN]->(:Movie)", "(:Person)-[:DIRECTED]->(:Movie)"]"#,
            "\nRelations properties are the following:\n",
            r#"[{type: "ACTED_IN", properties: [{property: "roles", type: "LIST"}]}]"#,
            "\n"
        )
    );
}
