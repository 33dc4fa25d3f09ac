use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::gateway::error::GatewayError;
use crate::gateway::state::HandlerState;
use crate::model::SimilarityScorer;

/// Request body of `POST /calculate-similarity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentencePair {
    pub sentence1: String,
    pub sentence2: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityResponse {
    pub similarity_score: f32,
}

/// Scores a sentence pair.
///
/// Inference runs on the blocking pool; any scorer failure becomes a 500
/// carrying the error text as `detail`.
#[instrument(skip(state, payload))]
pub async fn calculate_similarity_handler<S: SimilarityScorer>(
    State(state): State<HandlerState<S>>,
    payload: Result<Json<SentencePair>, JsonRejection>,
) -> Result<Json<SimilarityResponse>, GatewayError> {
    let Json(pair) = payload.map_err(|rejection| {
        debug!(error = %rejection, "Rejected similarity request body");
        GatewayError::InvalidRequest(rejection.body_text())
    })?;

    debug!(
        sentence1_len = pair.sentence1.len(),
        sentence2_len = pair.sentence2.len(),
        "Received similarity request"
    );

    let scorer = Arc::clone(&state.scorer);
    let result = tokio::task::spawn_blocking(move || {
        scorer.score(&pair.sentence1, &pair.sentence2)
    })
    .await
    .map_err(|e| GatewayError::Internal(format!("scoring task failed: {e}")))?;

    let similarity_score = result.map_err(|e| {
        warn!(error = %e, "Similarity scoring failed");
        GatewayError::from(e)
    })?;

    debug!(similarity_score, "Similarity computed");

    Ok(Json(SimilarityResponse { similarity_score }))
}
