//! HTTP gateway (Axum) exposing the similarity route plus health probes.

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::{ErrorResponse, GatewayError};
pub use handler::{SentencePair, SimilarityResponse, calculate_similarity_handler};
pub use state::HandlerState;

use crate::constants::{HEALTH_ROUTE, READY_ROUTE, SIMILARITY_ROUTE};
use crate::model::SimilarityScorer;

pub fn create_router_with_state<S: SimilarityScorer>(state: HandlerState<S>) -> Router {
    Router::new()
        .route(HEALTH_ROUTE, get(health_handler))
        .route(READY_ROUTE, get(ready_handler::<S>))
        .route(SIMILARITY_ROUTE, post(calculate_similarity_handler::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ReadyResponse {
    pub status: String,
    pub model_loaded: bool,
    pub device: String,
    pub profile: String,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
        }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler<S: SimilarityScorer>(State(state): State<HandlerState<S>>) -> Response {
    let model_loaded = state.scorer.is_model_loaded();

    let (status_code, status) = if model_loaded {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "pending")
    };

    (
        status_code,
        Json(ReadyResponse {
            status: status.to_string(),
            model_loaded,
            device: state.scorer.device_label().to_string(),
            profile: state.profile.to_string(),
        }),
    )
        .into_response()
}
