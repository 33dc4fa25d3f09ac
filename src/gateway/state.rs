use std::sync::Arc;

use crate::config::Profile;
use crate::model::SimilarityScorer;

#[derive(Debug)]
pub struct HandlerState<S: SimilarityScorer> {
    pub scorer: Arc<S>,

    pub profile: Profile,
}

// Manual impl: `S` itself need not be `Clone`.
impl<S: SimilarityScorer> Clone for HandlerState<S> {
    fn clone(&self) -> Self {
        Self {
            scorer: Arc::clone(&self.scorer),
            profile: self.profile,
        }
    }
}

impl<S: SimilarityScorer> HandlerState<S> {
    pub fn new(scorer: Arc<S>, profile: Profile) -> Self {
        Self { scorer, profile }
    }
}
