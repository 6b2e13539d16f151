use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MatchingError {
    /// Unrecognized strategy name or a threshold outside `0..=100`
    #[error("Invalid argument `{argument}`: {message}")]
    InvalidArgument { argument: String, message: String },
}

impl MatchingError {
    pub fn unknown_strategy(name: &str) -> Self {
        MatchingError::InvalidArgument {
            argument: name.to_string(),
            message: "unknown matching strategy, choose either 'phrase_match' or 'fuzzy'"
                .to_string(),
        }
    }

    pub fn threshold_out_of_range(threshold: u32) -> Self {
        MatchingError::InvalidArgument {
            argument: threshold.to_string(),
            message: "fuzzy threshold must be within 0..=100".to_string(),
        }
    }
}
