use thiserror::Error;

/// Everything that can go wrong between submitting a document and rendering
/// a similarity vector.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SummaryError {
    #[error("No document to summarise.")]
    EmptyDocument,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Non-OK response ({status}): {detail}")]
    Service { status: u16, detail: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Embedding dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Cannot normalize an empty sequence")]
    EmptyInput,

    #[error("Similarity score {index} is not finite")]
    NonFinite { index: usize },

    #[error("Sentence index {index} out of range for {len} sentences")]
    IndexOutOfRange { index: usize, len: usize },
}

impl From<reqwest::Error> for SummaryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SummaryError::Decode(err.to_string())
        } else {
            SummaryError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SummaryError {
    fn from(err: serde_json::Error) -> Self {
        SummaryError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SummaryError>;
