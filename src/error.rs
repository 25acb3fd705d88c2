use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GoldError {
    /// An input collection breaks an invariant the upstream cleansing step guarantees
    #[error("Precondition violated in {source_name}: {detail}")]
    PreconditionViolation { source_name: String, detail: String },

    /// A join key matched more than one candidate row
    #[error("Ambiguous reference in {join}: key '{key}' matched {matches} rows")]
    ReferenceAmbiguity {
        join: String,
        key: String,
        matches: usize,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Ingestion error: {0}")]
    Ingestion(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

impl GoldError {
    pub fn precondition(source_name: &str, detail: impl Into<String>) -> Self {
        GoldError::PreconditionViolation {
            source_name: source_name.to_string(),
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GoldError>;
