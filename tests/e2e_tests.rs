mod common;

use common::harness::{spawn_fixture_server, spawn_mock_server};
use common::http_client::TestClient;
use similarity::MockScorer;
use similarity::model::ScoreOutput;

#[tokio::test]
async fn test_fixture_model_scores_pair_over_http() {
    let server = spawn_fixture_server(ScoreOutput::Sigmoid).await.unwrap();
    let client = TestClient::new(server.url());

    let (status, body) = client
        .calculate_similarity("the cat sat on the mat", "the dog ran in the park")
        .await
        .expect("request failed");

    assert_eq!(status, 200);
    let score = body["similarity_score"]
        .as_f64()
        .expect("similarity_score should be a number");
    assert!((0.0..=1.0).contains(&score));

    server.shutdown().await;
}

#[tokio::test]
async fn test_fixture_model_is_stable_across_requests() {
    let server = spawn_fixture_server(ScoreOutput::Sigmoid).await.unwrap();
    let client = TestClient::new(server.url());

    let (_, first) = client
        .calculate_similarity("오늘 날씨가 좋다", "the weather is nice today")
        .await
        .unwrap();
    let (_, second) = client
        .calculate_similarity("오늘 날씨가 좋다.", "the weather is nice today.")
        .await
        .unwrap();

    assert_eq!(first["similarity_score"], second["similarity_score"]);
}

#[tokio::test]
async fn test_fixture_model_concurrent_requests() {
    let server = spawn_fixture_server(ScoreOutput::Logit).await.unwrap();
    let url = server.url();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = TestClient::new(url.clone());
            tokio::spawn(async move {
                client
                    .calculate_similarity("the cat sat", "the cat sat on the mat")
                    .await
            })
        })
        .collect();

    let mut scores = Vec::new();
    for handle in handles {
        let (status, body) = handle.await.unwrap().unwrap();
        assert_eq!(status, 200);
        scores.push(body["similarity_score"].as_f64().unwrap());
    }

    assert!(scores.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test]
async fn test_fixture_model_empty_sentence_is_500() {
    let server = spawn_fixture_server(ScoreOutput::Sigmoid).await.unwrap();
    let client = TestClient::new(server.url());

    let (status, body) = client
        .calculate_similarity("the cat sat", "")
        .await
        .unwrap();

    assert_eq!(status, 500);
    assert_eq!(body["detail"], "sentence2 is empty");
}

#[tokio::test]
async fn test_mock_server_health_and_ready() {
    let server = spawn_mock_server(MockScorer::new()).await.unwrap();
    let client = TestClient::new(server.url());

    let (status, body) = client.get("/healthz").await.unwrap();
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");

    let (status, body) = client.get("/ready").await.unwrap();
    assert_eq!(status, 200);
    assert_eq!(body["model_loaded"], true);
}

#[tokio::test]
async fn test_mock_server_failure_maps_to_detail() {
    let server = spawn_mock_server(MockScorer::failing("device lost")).await.unwrap();
    let client = TestClient::new(server.url());

    let (status, body) = client
        .calculate_similarity("the cat sat", "the dog ran")
        .await
        .unwrap();

    assert_eq!(status, 500);
    assert!(body["detail"].as_str().unwrap().contains("device lost"));
}
