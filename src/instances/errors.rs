use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProjectionError {
    /// The instance's label has no property of the requested type, so there is
    /// nothing sensible to project for that endpoint.
    #[error("No {data_type} properties selected for {side} label `{label}`")]
    MissingProjection {
        side: String,
        label: String,
        data_type: String,
    },
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}
