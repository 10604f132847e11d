//! HTTP tests for the embedding surfaces of both services

mod common;

use common::{embedding_app, fix_app, spawn_app, EchoProvider, FailingEmbedder, HashEmbedder, DIMENSION};
use futures::future::join_all;
use serde_json::{json, Value};
use std::sync::Arc;

#[tokio::test]
async fn test_embeddings_endpoint_returns_model_dimension() {
    let base = spawn_app(embedding_app(Arc::new(HashEmbedder))).await;

    let response = reqwest::Client::new()
        .post(format!("{}/embeddings", base))
        .json(&json!({"text": "Security group allows 0.0.0.0/0 on port 22"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    let embeddings = body["embeddings"].as_array().unwrap();
    assert_eq!(embeddings.len(), DIMENSION);
    assert!(embeddings.iter().all(|v| v.is_f64()));
}

#[tokio::test]
async fn test_same_text_same_vector() {
    let base = spawn_app(embedding_app(Arc::new(HashEmbedder))).await;
    let client = reqwest::Client::new();

    let mut vectors = Vec::new();
    for _ in 0..2 {
        let body: Value = client
            .post(format!("{}/embeddings", base))
            .json(&json!({"text": "IAM user without MFA"}))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        vectors.push(body["embeddings"].clone());
    }

    assert_eq!(vectors[0], vectors[1]);
}

#[tokio::test]
async fn test_empty_text_is_embedded() {
    let base = spawn_app(embedding_app(Arc::new(HashEmbedder))).await;

    let response = reqwest::Client::new()
        .post(format!("{}/embeddings", base))
        .json(&json!({"text": ""}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["embeddings"].as_array().unwrap().len(), DIMENSION);
}

#[tokio::test]
async fn test_inference_failure_is_server_error() {
    let base = spawn_app(embedding_app(Arc::new(FailingEmbedder))).await;

    let response = reqwest::Client::new()
        .post(format!("{}/embeddings", base))
        .json(&json!({"text": "anything"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("inference crashed"));
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let base = spawn_app(embedding_app(Arc::new(HashEmbedder))).await;

    let response = reqwest::Client::new()
        .post(format!("{}/embeddings", base))
        .json(&json!({"inp": "wrong field"}))
        .send()
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_fix_service_embedding_endpoint() {
    let base = spawn_app(fix_app(Arc::new(HashEmbedder), Arc::new(EchoProvider))).await;

    let body: Value = reqwest::Client::new()
        .post(format!("{}/embedding", base))
        .json(&json!({"inp": "EBS volume not encrypted"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let embedding: Vec<f32> = serde_json::from_value(body["embedding"].clone()).unwrap();
    assert_eq!(embedding, HashEmbedder::vector_for("EBS volume not encrypted"));
}

#[tokio::test]
async fn test_concurrent_requests_are_correlated() {
    let base = spawn_app(embedding_app(Arc::new(HashEmbedder))).await;
    let client = reqwest::Client::new();

    let requests = (0..50).map(|i| {
        let client = client.clone();
        let url = format!("{}/embeddings", base);
        async move {
            let text = format!("finding number {}", i);
            let body: Value = client
                .post(url)
                .json(&json!({"text": text}))
                .send()
                .await
                .unwrap()
                .json()
                .await
                .unwrap();
            let embedding: Vec<f32> = serde_json::from_value(body["embeddings"].clone()).unwrap();
            (text, embedding)
        }
    });

    for (text, embedding) in join_all(requests).await {
        assert_eq!(embedding, HashEmbedder::vector_for(&text));
    }
}

#[tokio::test]
async fn test_health_reports_model() {
    let base = spawn_app(embedding_app(Arc::new(HashEmbedder))).await;

    let response = reqwest::get(format!("{}/health", base)).await.unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "embedding-service");
    assert_eq!(body["components"][0]["message"], "hash-embedder (384 dimensions)");
}
