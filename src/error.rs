use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Error)]
pub enum PollError {
    #[error("option {index} has no voter to label it with")]
    MissingVoter { index: usize },

    #[error("malformed poll record: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SlideError {
    #[error("invalid slide identifier: {0}")]
    InvalidIdentifier(String),

    #[error("slide {0} is already registered")]
    Duplicate(String),
}
