//! Entity-to-schema matching
//!
//! Two entry points:
//! - [`entity_matcher`] compares already-extracted entity strings against
//!   node labels by Levenshtein distance;
//! - [`question_parser`] pulls candidates out of a free-text question and
//!   matches them by fuzzy ratio or by whole-phrase equality.

pub mod entity_matcher;
pub mod errors;
pub mod fuzzy;
pub mod question_parser;

pub use entity_matcher::{dedup_labels, match_entities, match_entities_batch};
pub use errors::MatchingError;
pub use question_parser::{
    extract_relevant_nodes, CandidateExtractor, HeuristicExtractor, MatchStrategy,
    DEFAULT_FUZZY_THRESHOLD,
};
