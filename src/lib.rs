//! Sentence similarity service library (used by the server binary and tests).
//!
//! # Public API Surface
//!
//! - [`Config`], [`Profile`], [`ConfigError`] - environment-selected configuration
//! - [`SentenceSimilarity`], [`ScorerConfig`], [`ScoreOutput`] - the scoring model
//! - [`SimilarityScorer`] - the trait the HTTP layer is generic over
//! - [`ensure_terminal_punctuation`], [`prepare_pair`] - input normalization
//! - [`gateway`] - Axum router, handlers and error mapping
//!
//! ## Test/Mock Support
//! [`MockScorer`] and the checkpoint writer in [`model::fixture`] are available
//! behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod gateway;
pub mod model;

pub use config::{Config, ConfigError, Profile};
pub use gateway::{GatewayError, HandlerState, create_router_with_state};
#[cfg(any(test, feature = "mock"))]
pub use model::MockScorer;
pub use model::{
    ScoreOutput, ScorerConfig, SentenceSimilarity, SimilarityError, SimilarityScorer,
    ensure_terminal_punctuation, prepare_pair,
};
