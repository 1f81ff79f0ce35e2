use thiserror::Error;

// * Unified Error type for header generation.
#[derive(Error, Debug)]
pub enum HeaderError {
    #[error("Invalid header format: {0}")]
    MalformedInput(#[from] serde_json::Error),

    #[error("Invalid header name: {0}")]
    InvalidHeaderName(String),

    #[error("Invalid value for header {name}")]
    InvalidHeaderValue { name: String },
}
