//! Sentence normalization applied before tokenization.

use std::borrow::Cow;
use std::fmt;

use crate::constants::{DEFAULT_TERMINATOR, TERMINAL_PUNCTUATION};

use super::error::SimilarityError;

/// Which side of the pair a sentence came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentencePosition {
    First,
    Second,
}

impl fmt::Display for SentencePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentencePosition::First => f.write_str("sentence1"),
            SentencePosition::Second => f.write_str("sentence2"),
        }
    }
}

fn ends_with_terminal(text: &str) -> bool {
    text.ends_with(TERMINAL_PUNCTUATION)
}

/// Makes sure `text` ends with `!`, `.` or `?`.
///
/// Only the last raw character is checked: text that ends with terminal
/// punctuation is returned untouched, anything else has trailing whitespace
/// dropped and a period appended (so `"done. "` becomes `"done.."`).
pub fn ensure_terminal_punctuation(text: &str) -> Cow<'_, str> {
    if ends_with_terminal(text) {
        return Cow::Borrowed(text);
    }

    let trimmed = text.trim_end();
    let mut owned = String::with_capacity(trimmed.len() + 1);
    owned.push_str(trimmed);
    owned.push(DEFAULT_TERMINATOR);
    Cow::Owned(owned)
}

/// Rejects empty input and normalizes both sentences of a pair.
pub fn prepare_pair<'a>(
    sentence1: &'a str,
    sentence2: &'a str,
) -> Result<(Cow<'a, str>, Cow<'a, str>), SimilarityError> {
    if sentence1.is_empty() {
        return Err(SimilarityError::EmptySentence {
            position: SentencePosition::First,
        });
    }
    if sentence2.is_empty() {
        return Err(SimilarityError::EmptySentence {
            position: SentencePosition::Second,
        });
    }

    Ok((
        ensure_terminal_punctuation(sentence1),
        ensure_terminal_punctuation(sentence2),
    ))
}
