//! Label matching through the public API

use kgschema::matching::{
    dedup_labels, extract_relevant_nodes, match_entities, match_entities_batch,
    HeuristicExtractor, MatchStrategy, MatchingError,
};
use test_case::test_case;

const LABELS: [&str; 6] = ["Movie", "Person", "Genre", "User", "Studio", "Production Company"];

#[test_case("Movie" ; "exact label")]
#[test_case("movies" ; "lower case plural")]
#[test_case("Usr" ; "typo")]
#[test_case("Production Compan" ; "multi word")]
fn test_matching_is_monotonic_in_distance(entity: &str) {
    for k in 0..8 {
        let at_k = match_entities(entity, &LABELS, k);
        let at_next = match_entities(entity, &LABELS, k + 1);
        for label in &at_k {
            assert!(at_next.contains(label), "{} lost going from {} to {}", label, k, k + 1);
        }
    }
}

#[test]
fn test_batch_is_union_of_single_matches() {
    let entities = ["Movies", "Persons", "Studios"];
    let batch = match_entities_batch(&entities, &LABELS, 1);

    let mut expected = Vec::new();
    for entity in entities {
        expected.extend(match_entities(entity, &LABELS, 1));
    }
    assert_eq!(batch, expected);
    assert_eq!(batch, vec!["Movie", "Person", "Studio"]);
}

#[test]
fn test_dedup_after_batch() {
    let batch = match_entities_batch(&["Movie", "Movies", "movie"], &LABELS, 1);
    assert_eq!(batch.len(), 3);
    assert_eq!(dedup_labels(batch), vec!["Movie"]);
}

#[test]
fn test_fuzzy_question_matching() {
    let strategy = MatchStrategy::from_name("fuzzy", 65).unwrap();
    let matched = extract_relevant_nodes(
        "Which movies did each person direct?",
        &LABELS,
        &strategy,
        &HeuristicExtractor,
    )
    .unwrap();
    assert_eq!(matched, vec!["Movie", "Person"]);
}

#[test]
fn test_phrase_question_matching() {
    let matched = extract_relevant_nodes(
        "List every production company and its studio",
        &LABELS,
        &MatchStrategy::PhraseMatch,
        &HeuristicExtractor,
    )
    .unwrap();
    assert_eq!(matched, vec!["Production Company", "Studio"]);
}

#[test]
fn test_unknown_strategy() {
    let err = MatchStrategy::from_name("semantic", 65).unwrap_err();
    assert!(matches!(err, MatchingError::InvalidArgument { .. }));
}
