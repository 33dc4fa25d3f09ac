//! Test server harness.

use similarity::config::Profile;
use similarity::gateway::{HandlerState, create_router_with_state};
use similarity::model::fixture::write_tiny_electra;
use similarity::model::{ScoreOutput, ScorerConfig, SentenceSimilarity, SimilarityScorer};
use similarity::MockScorer;
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub struct TestServer {
    pub addr: SocketAddr,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    _temp_dir: Option<TempDir>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

async fn spawn_with_scorer<S: SimilarityScorer>(
    scorer: S,
    temp_dir: Option<TempDir>,
) -> Result<TestServer, ServerStartupError> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let addr = listener.local_addr()?;

    let state = HandlerState::new(Arc::new(scorer), Profile::Local);
    let app = create_router_with_state(state);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let server_handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    Ok(TestServer {
        addr,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
        _temp_dir: temp_dir,
    })
}

/// Spawns a server backed by [`MockScorer`].
pub async fn spawn_mock_server(scorer: MockScorer) -> Result<TestServer, ServerStartupError> {
    spawn_with_scorer(scorer, None).await
}

/// Spawns a server running the real loading and inference path on a tiny
/// randomly initialised ELECTRA checkpoint written to a temp dir.
pub async fn spawn_fixture_server(
    score_output: ScoreOutput,
) -> Result<TestServer, ServerStartupError> {
    let temp_dir = TempDir::new()?;
    write_tiny_electra(temp_dir.path())
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;

    let config = ScorerConfig::new(temp_dir.path()).with_score_output(score_output);
    let scorer = SentenceSimilarity::load_on(config, candle_core::Device::Cpu)
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;

    spawn_with_scorer(scorer, Some(temp_dir)).await
}
