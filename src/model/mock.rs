//! In-process scorer for tests (no model files needed).

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::SimilarityScorer;
use super::error::SimilarityError;
use super::text::prepare_pair;

#[derive(Debug, Clone)]
enum MockBehavior {
    Overlap,
    Fixed(f32),
    Fail(String),
}

/// Scorer that normalizes input like the real model and then either returns
/// a word-overlap score, a fixed score, or a configured failure.
#[derive(Debug)]
pub struct MockScorer {
    behavior: MockBehavior,
    loaded: bool,
    calls: AtomicUsize,
}

impl Default for MockScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockScorer {
    pub fn new() -> Self {
        Self {
            behavior: MockBehavior::Overlap,
            loaded: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn fixed(score: f32) -> Self {
        Self {
            behavior: MockBehavior::Fixed(score),
            ..Self::new()
        }
    }

    /// Every call fails with an inference error carrying `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::Fail(reason.into()),
            ..Self::new()
        }
    }

    /// Reports the model as not loaded (readiness checks).
    pub fn unloaded() -> Self {
        Self {
            loaded: false,
            ..Self::new()
        }
    }

    /// Number of score calls that reached the model stage.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn overlap_score(sentence1: &str, sentence2: &str) -> f32 {
        let words = |text: &str| -> HashSet<String> {
            text.to_lowercase()
                .split(|c: char| !c.is_alphanumeric())
                .filter(|w| !w.is_empty())
                .map(str::to_string)
                .collect()
        };

        let left = words(sentence1);
        let right = words(sentence2);
        let union = left.union(&right).count();
        if union == 0 {
            return 0.0;
        }

        left.intersection(&right).count() as f32 / union as f32
    }
}

impl SimilarityScorer for MockScorer {
    fn score(&self, sentence1: &str, sentence2: &str) -> Result<f32, SimilarityError> {
        let (sentence1, sentence2) = prepare_pair(sentence1, sentence2)?;
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Overlap => Ok(Self::overlap_score(&sentence1, &sentence2)),
            MockBehavior::Fixed(score) => Ok(*score),
            MockBehavior::Fail(reason) => Err(SimilarityError::InferenceFailed {
                reason: reason.clone(),
            }),
        }
    }

    fn is_model_loaded(&self) -> bool {
        self.loaded
    }

    fn device_label(&self) -> &'static str {
        "mock"
    }
}
