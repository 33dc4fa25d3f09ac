//! Shared defaults.
//!
//! Profile-specific values live in [`crate::config`]; everything here is the
//! same for every profile.

/// Hub repository the tokenizer is fetched from when the model directory has none.
pub const DEFAULT_MODEL_NAME: &str = "snunlp/KR-ELECTRA-discriminator";

/// Maximum number of tokens for the joint sentence pair (after truncation).
pub const DEFAULT_MAX_SEQ_LEN: usize = 128;

/// Characters accepted as the end of a sentence.
pub const TERMINAL_PUNCTUATION: [char; 3] = ['!', '.', '?'];

/// Appended to sentences without terminal punctuation.
pub const DEFAULT_TERMINATOR: char = '.';

/// Route scoring a sentence pair.
pub const SIMILARITY_ROUTE: &str = "/calculate-similarity";

pub const HEALTH_ROUTE: &str = "/healthz";

pub const READY_ROUTE: &str = "/ready";
