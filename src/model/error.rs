use std::path::PathBuf;
use thiserror::Error;

use super::text::SentencePosition;

#[derive(Debug, Error)]
pub enum SimilarityError {
    #[error("{position} is empty")]
    EmptySentence { position: SentencePosition },

    #[error("similarity model not found at path: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("failed to load similarity model: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("similarity inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("invalid scorer configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<candle_core::Error> for SimilarityError {
    fn from(err: candle_core::Error) -> Self {
        SimilarityError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for SimilarityError {
    fn from(err: std::io::Error) -> Self {
        SimilarityError::ModelLoadFailed {
            reason: err.to_string(),
        }
    }
}
