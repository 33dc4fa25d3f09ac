//! Sentence-pair similarity model.
//!
//! - [`text`] normalizes sentences before tokenization.
//! - [`tokenizer`] resolves the pair tokenizer (local files or hub).
//! - [`classifier`] holds the encoder and regression head.
//! - [`SentenceSimilarity`] ties them together behind [`SimilarityScorer`].

pub mod classifier;
pub mod config;
/// Device selection (CPU / CUDA / Metal).
pub mod device;
mod error;
mod similarity;
pub mod text;
pub mod tokenizer;

#[cfg(any(test, feature = "mock"))]
pub mod fixture;
#[cfg(any(test, feature = "mock"))]
mod mock;


pub use classifier::{CheckpointLayout, HeadKind, SequenceRegressor};
pub use config::{ScoreOutput, ScorerConfig};
pub use error::SimilarityError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockScorer;
pub use similarity::SentenceSimilarity;
pub use text::{SentencePosition, ensure_terminal_punctuation, prepare_pair};
pub use tokenizer::TokenizerSource;

/// Scores how semantically close two sentences are.
///
/// The gateway is generic over this trait so routes can be exercised without
/// model files.
pub trait SimilarityScorer: Send + Sync + 'static {
    fn score(&self, sentence1: &str, sentence2: &str) -> Result<f32, SimilarityError>;

    fn is_model_loaded(&self) -> bool;

    fn device_label(&self) -> &'static str;
}
