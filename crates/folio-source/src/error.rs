use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Upstream query failed with code {code}: {message}")]
    Upstream { code: i64, message: String },

    #[error("Upstream returned no results")]
    NoResults,

    #[error("Invalid row: {0}")]
    InvalidRow(String),
}
