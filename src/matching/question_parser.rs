//! Match node labels against a natural-language question
//!
//! The question is lower-cased and handed to a [`CandidateExtractor`], which
//! supplies noun candidates and a token sequence. Labels are then matched in
//! one of two ways:
//!
//! - **fuzzy**: every noun candidate is scored against every lower-cased label
//!   with [`fuzzy::ratio`]; pairs at or above the threshold are accepted and
//!   repeated labels collapse to their first occurrence.
//! - **phrase_match**: a label matches wherever its whole token sequence
//!   appears contiguously in the question, case-insensitively. Matches are
//!   reported in question order, each label once.
//!
//! [`fuzzy::ratio`]: super::fuzzy::ratio

use std::collections::HashSet;
use std::str::FromStr;

use super::entity_matcher::dedup_labels;
use super::errors::MatchingError;
use super::fuzzy;

pub const DEFAULT_FUZZY_THRESHOLD: u32 = 65;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchStrategy {
    #[default]
    PhraseMatch,
    Fuzzy { threshold: u32 },
}

impl MatchStrategy {
    /// Fuzzy strategy with a validated threshold
    pub fn fuzzy(threshold: u32) -> Result<Self, MatchingError> {
        if threshold > 100 {
            return Err(MatchingError::threshold_out_of_range(threshold));
        }
        Ok(MatchStrategy::Fuzzy { threshold })
    }

    /// Build a strategy from its name (`"phrase_match"` or `"fuzzy"`).
    /// The threshold only applies to `"fuzzy"`.
    pub fn from_name(name: &str, threshold: u32) -> Result<Self, MatchingError> {
        match name {
            "phrase_match" => Ok(MatchStrategy::PhraseMatch),
            "fuzzy" => MatchStrategy::fuzzy(threshold),
            other => Err(MatchingError::unknown_strategy(other)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MatchStrategy::PhraseMatch => "phrase_match",
            MatchStrategy::Fuzzy { .. } => "fuzzy",
        }
    }
}

impl FromStr for MatchStrategy {
    type Err = MatchingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MatchStrategy::from_name(s, DEFAULT_FUZZY_THRESHOLD)
    }
}

/// Source of candidate strings for a question.
///
/// Implementations may wrap a real tagger; the crate ships [`HeuristicExtractor`].
pub trait CandidateExtractor {
    /// Noun-like candidate tokens of `text`
    fn noun_candidates(&self, text: &str) -> Vec<String>;

    /// Token sequence of `text`, used for whole-phrase comparison
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Words never treated as noun candidates
const STOP_WORDS: &[&str] = &[
    "a", "about", "all", "an", "and", "any", "are", "as", "at", "be", "been", "by", "can",
    "could", "did", "do", "does", "each", "for", "from", "give", "has", "have", "how", "i", "in",
    "into", "is", "it", "its", "list", "many", "me", "more", "most", "much", "my", "name",
    "of", "on", "or", "other", "show", "some", "than", "that", "the", "their", "them", "there",
    "these", "they", "this", "those", "to", "was", "were", "what", "when", "where", "which",
    "who", "whom", "whose", "why", "will", "with", "would", "you", "your",
];

/// Contractions and possessives split off into their own token
const CLITICS: &[&str] = &["'s", "'m", "'re", "'ve", "'d", "'ll"];

/// Tokenizer plus stop-word filter.
///
/// Tokens are maximal runs of alphanumeric characters, `_`, `-` or `'`,
/// lower-cased, with quotes trimmed. Clitics become separate tokens
/// (`movie's` is `movie` `'s`, `don't` is `do` `n't`). Every word token that is
/// not a stop word, not purely numeric and at least two characters long counts
/// as a noun candidate.
#[derive(Debug, Clone, Default)]
pub struct HeuristicExtractor;

impl CandidateExtractor for HeuristicExtractor {
    fn noun_candidates(&self, text: &str) -> Vec<String> {
        self.tokenize(text)
            .into_iter()
            .filter(|t| t.chars().count() > 1)
            .filter(|t| !t.contains('\''))
            .filter(|t| !t.chars().all(|c| c.is_numeric()))
            .filter(|t| !STOP_WORDS.contains(&t.as_str()))
            .collect()
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let text = text.replace('\u{2019}', "'");
        let mut tokens = Vec::new();

        for raw in text.split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-' || c == '\''))
        {
            let word = raw.trim_matches(|c| c == '\'' || c == '-');
            if word.is_empty() {
                continue;
            }
            let word = word.to_lowercase();
            match split_clitic(&word) {
                Some((stem, clitic)) => {
                    tokens.push(stem.to_string());
                    tokens.push(clitic.to_string());
                }
                None => tokens.push(word),
            }
        }
        tokens
    }
}

fn split_clitic(word: &str) -> Option<(&str, &str)> {
    let idx = word.rfind('\'')?;
    let (stem, clitic) = word.split_at(idx);
    if stem.is_empty() {
        return None;
    }
    if clitic == "'t" {
        return stem.strip_suffix('n').filter(|s| !s.is_empty()).map(|s| (s, "n't"));
    }
    CLITICS.contains(&clitic).then_some((stem, clitic))
}

/// Node labels relevant to `question` under `strategy`.
pub fn extract_relevant_nodes<S, X>(
    question: &str,
    node_labels: &[S],
    strategy: &MatchStrategy,
    extractor: &X,
) -> Result<Vec<String>, MatchingError>
where
    S: AsRef<str>,
    X: CandidateExtractor + ?Sized,
{
    let question = question.to_lowercase();
    let lowercase_labels: Vec<String> = node_labels
        .iter()
        .map(|l| l.as_ref().to_lowercase())
        .collect();

    // Lower-cased form -> first original label with that form
    let original = |lower: &str| -> String {
        let idx = lowercase_labels
            .iter()
            .position(|l| l == lower)
            .unwrap_or_default();
        node_labels[idx].as_ref().to_string()
    };

    let matched = match strategy {
        MatchStrategy::PhraseMatch => {
            let doc = extractor.tokenize(&question);
            let patterns: Vec<(usize, Vec<String>)> = lowercase_labels
                .iter()
                .enumerate()
                .map(|(i, label)| (i, extractor.tokenize(label)))
                .filter(|(_, tokens)| !tokens.is_empty())
                .collect();

            let mut matched = Vec::new();
            for start in 0..doc.len() {
                for (i, tokens) in &patterns {
                    if doc[start..].starts_with(tokens) {
                        matched.push(original(lowercase_labels[*i].as_str()));
                    }
                }
            }
            dedup_labels(matched)
        }
        MatchStrategy::Fuzzy { threshold } => {
            if *threshold > 100 {
                return Err(MatchingError::threshold_out_of_range(*threshold));
            }
            let nouns = extractor.noun_candidates(&question);
            log::debug!("Noun candidates: {:?}", nouns);

            let mut seen = HashSet::new();
            let mut matched = Vec::new();
            for noun in &nouns {
                for label in &lowercase_labels {
                    if fuzzy::ratio(noun, label) >= *threshold {
                        let label = original(label.as_str());
                        if seen.insert(label.clone()) {
                            matched.push(label);
                        }
                    }
                }
            }
            matched
        }
    };

    log::debug!(
        "{} strategy matched {} label(s): {:?}",
        strategy.name(),
        matched.len(),
        matched
    );
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: [&str; 5] = ["Movie", "Person", "Genre", "Production Company", "Actor"];

    #[test]
    fn test_strategy_from_name() {
        assert_eq!(
            MatchStrategy::from_name("phrase_match", 65).unwrap(),
            MatchStrategy::PhraseMatch
        );
        assert_eq!(
            MatchStrategy::from_name("fuzzy", 80).unwrap(),
            MatchStrategy::Fuzzy { threshold: 80 }
        );
    }

    #[test]
    fn test_unknown_strategy_is_invalid_argument() {
        let err = MatchStrategy::from_name("semantic", 65).unwrap_err();
        assert!(matches!(err, MatchingError::InvalidArgument { .. }));
        assert!("levenshtein".parse::<MatchStrategy>().is_err());
    }

    #[test]
    fn test_threshold_out_of_range() {
        assert!(MatchStrategy::fuzzy(101).is_err());
        assert!(MatchStrategy::fuzzy(100).is_ok());

        let result = extract_relevant_nodes(
            "movies",
            &LABELS,
            &MatchStrategy::Fuzzy { threshold: 150 },
            &HeuristicExtractor,
        );
        assert!(matches!(result, Err(MatchingError::InvalidArgument { .. })));
    }

    #[test]
    fn test_heuristic_tokenize_and_nouns() {
        let extractor = HeuristicExtractor;
        assert_eq!(
            extractor.tokenize("Which actors played in 'Heat' (1995)?"),
            vec!["which", "actors", "played", "in", "heat", "1995"]
        );
        assert_eq!(
            extractor.noun_candidates("which actors played in heat 1995"),
            vec!["actors", "played", "heat"]
        );
    }

    #[test]
    fn test_tokenize_splits_clitics() {
        let extractor = HeuristicExtractor;
        assert_eq!(
            extractor.tokenize("Who's the movie\u{2019}s director? Don't guess O'Neil's role"),
            vec![
                "who", "'s", "the", "movie", "'s", "director", "do", "n't", "guess", "o'neil",
                "'s", "role"
            ]
        );
        assert_eq!(
            extractor.noun_candidates("the movie's genre"),
            vec!["movie", "genre"]
        );
    }

    #[test]
    fn test_phrase_match_possessive() {
        let matched = extract_relevant_nodes(
            "What is the movie's genre?",
            &["Movie", "Genre"],
            &MatchStrategy::PhraseMatch,
            &HeuristicExtractor,
        )
        .unwrap();
        assert_eq!(matched, vec!["Movie", "Genre"]);

        let matched = extract_relevant_nodes(
            "Which genres are the actors' favourites?",
            &LABELS,
            &MatchStrategy::PhraseMatch,
            &HeuristicExtractor,
        )
        .unwrap();
        assert!(matched.is_empty());
    }

    #[test]
    fn test_fuzzy_matches_plurals_once() {
        let matched = extract_relevant_nodes(
            "Which movies and which other movies feature the actor?",
            &LABELS,
            &MatchStrategy::Fuzzy { threshold: 65 },
            &HeuristicExtractor,
        )
        .unwrap();
        assert_eq!(matched, vec!["Movie", "Actor"]);
    }

    #[test]
    fn test_phrase_match_whole_phrases_only() {
        let matched = extract_relevant_nodes(
            "Which production company made the movie with the most actors?",
            &LABELS,
            &MatchStrategy::PhraseMatch,
            &HeuristicExtractor,
        )
        .unwrap();
        // "actors" is not the phrase "actor"; "company" alone is not "production company"
        assert_eq!(matched, vec!["Production Company", "Movie"]);
    }

    #[test]
    fn test_phrase_match_case_insensitive_in_question_order() {
        let matched = extract_relevant_nodes(
            "GENRE of each MOVIE",
            &LABELS,
            &MatchStrategy::PhraseMatch,
            &HeuristicExtractor,
        )
        .unwrap();
        assert_eq!(matched, vec!["Genre", "Movie"]);
    }
}
