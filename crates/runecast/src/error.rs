use thiserror::Error;

/// Why a pattern definition was rejected by the library.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("pattern id must not be empty")]
    EmptyId,

    #[error("pattern '{0}' has no display name")]
    EmptyDisplayName(String),

    #[error("pattern '{0}' has no associated action")]
    EmptyAction(String),

    #[error("pattern '{id}' threshold {value} is outside 0..=1")]
    InvalidThreshold { id: String, value: f32 },

    #[error("pattern '{0}' needs a minimum point count of at least 1")]
    InvalidMinimumPoints(String),

    #[error("pattern '{id}' has an inverted or non-finite {feature} range")]
    InvalidRange { id: String, feature: &'static str },

    #[error("'{0}' is a built-in pattern and cannot be replaced")]
    BuiltInId(String),

    #[error("malformed pattern data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Why a path was refused before feature extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path too short: {len} samples, need {min}")]
    TooShort { len: usize, min: usize },

    #[error("path too long: {len} samples, limit {max}")]
    TooLong { len: usize, max: usize },

    #[error("invalid sample at index {index}")]
    InvalidSample { index: usize },
}
