//! Exercises the DeepSeek client against a local stand-in for the upstream API.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use deepcheck::analysis::Analyzer;
use deepcheck::api::{build_router, AppState};
use deepcheck::config::AnalysisConfig;
use deepcheck::errors::{AnalyzerError, RetryPolicy};
use deepcheck::llm::{CompletionOptions, DeepSeekProvider, LLMProvider};

const API_KEY: &str = "sk-test-key-0001";

#[derive(Clone)]
struct Upstream {
    script: Arc<Vec<(u16, Value)>>,
    delay: Duration,
    hits: Arc<AtomicU32>,
    last_auth: Arc<Mutex<Option<String>>>,
    last_body: Arc<Mutex<Option<Value>>>,
}

async fn chat_completions(
    State(upstream): State<Upstream>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let hit = upstream.hits.fetch_add(1, Ordering::SeqCst) as usize;
    *upstream.last_auth.lock().unwrap() = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *upstream.last_body.lock().unwrap() = Some(body);

    if !upstream.delay.is_zero() {
        tokio::time::sleep(upstream.delay).await;
    }
    let (status, payload) = upstream.script[hit.min(upstream.script.len() - 1)].clone();
    (StatusCode::from_u16(status).unwrap(), Json(payload))
}

/// Start a fake upstream that replays `script` (the last entry repeats).
async fn spawn_upstream(script: Vec<(u16, Value)>, delay: Duration) -> (String, Upstream) {
    let upstream = Upstream {
        script: Arc::new(script),
        delay,
        hits: Arc::new(AtomicU32::new(0)),
        last_auth: Arc::new(Mutex::new(None)),
        last_body: Arc::new(Mutex::new(None)),
    };
    let app = Router::new()
        .route("/v1/chat/completions", post(chat_completions))
        .with_state(upstream.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}/v1", addr), upstream)
}

fn fast_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        base_delay: Duration::from_millis(1),
        rate_limit_multiplier: 1,
        timeout_base: Duration::from_secs(5),
        timeout_increment: Duration::ZERO,
        timeout_max: Duration::from_secs(5),
    }
}

fn provider(base_url: &str, policy: RetryPolicy) -> DeepSeekProvider {
    DeepSeekProvider::with_base_url(API_KEY, None, base_url).with_retry_policy(policy)
}

fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "model": "deepseek-chat",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}],
        "usage": {"prompt_tokens": 50, "completion_tokens": 25, "total_tokens": 75}
    })
}

fn error_body(message: &str) -> Value {
    json!({"error": {"message": message, "type": "error"}})
}

#[tokio::test]
async fn test_rate_limited_then_success() {
    let (url, upstream) = spawn_upstream(
        vec![
            (429, error_body("Rate limit reached")),
            (429, error_body("Rate limit reached")),
            (200, completion("{\"issues\": []}")),
        ],
        Duration::ZERO,
    )
    .await;

    let response = provider(&url, fast_policy(3))
        .complete("analyze", Some("system"), &CompletionOptions::default())
        .await
        .unwrap();

    assert_eq!(upstream.hits.load(Ordering::SeqCst), 3);
    assert_eq!(response.content, "{\"issues\": []}");
    assert_eq!(response.usage.unwrap().total_tokens, 75);
    assert_eq!(response.model, "deepseek-chat");
}

#[tokio::test]
async fn test_rate_limit_exhausts_budget() {
    let (url, upstream) = spawn_upstream(vec![(429, error_body("Rate limit reached"))], Duration::ZERO).await;

    let err = provider(&url, fast_policy(3))
        .complete("analyze", None, &CompletionOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AnalyzerError::RateLimit(_)));
    assert_eq!(upstream.hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_unauthorized_is_not_retried() {
    let (url, upstream) = spawn_upstream(
        vec![(401, error_body(&format!("Authentication Fails, key {}", API_KEY)))],
        Duration::ZERO,
    )
    .await;

    let err = provider(&url, fast_policy(3))
        .complete("analyze", None, &CompletionOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AnalyzerError::Authentication(_)));
    assert_eq!(upstream.hits.load(Ordering::SeqCst), 1);
    assert!(!err.to_string().contains(API_KEY));
}

#[tokio::test]
async fn test_server_errors_retried_then_surface_last() {
    let (url, upstream) = spawn_upstream(
        vec![
            (500, error_body("internal")),
            (502, error_body("bad gateway")),
            (503, error_body("overloaded")),
        ],
        Duration::ZERO,
    )
    .await;

    let err = provider(&url, fast_policy(3))
        .complete("analyze", None, &CompletionOptions::default())
        .await
        .unwrap_err();

    assert_eq!(upstream.hits.load(Ordering::SeqCst), 3);
    match err {
        AnalyzerError::Upstream { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "overloaded");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_then_success() {
    let (url, upstream) = spawn_upstream(
        vec![(503, error_body("overloaded")), (200, completion("ok"))],
        Duration::ZERO,
    )
    .await;

    let response = provider(&url, fast_policy(3))
        .complete("analyze", None, &CompletionOptions::default())
        .await
        .unwrap();

    assert_eq!(response.content, "ok");
    assert_eq!(upstream.hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_client_error_not_retried() {
    let (url, upstream) = spawn_upstream(vec![(400, error_body("Invalid request"))], Duration::ZERO).await;

    let err = provider(&url, fast_policy(3))
        .complete("analyze", None, &CompletionOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AnalyzerError::LLMApi(_)));
    assert_eq!(upstream.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let (url, upstream) = spawn_upstream(vec![(200, completion("late"))], Duration::from_millis(500)).await;
    let policy = RetryPolicy {
        timeout_base: Duration::from_millis(50),
        timeout_max: Duration::from_millis(50),
        ..fast_policy(2)
    };

    let err = provider(&url, policy)
        .complete("analyze", None, &CompletionOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AnalyzerError::Timeout(_)));
    assert_eq!(upstream.hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_empty_choices_is_api_error() {
    let (url, _) = spawn_upstream(vec![(200, json!({"choices": []}))], Duration::ZERO).await;

    let err = provider(&url, fast_policy(3))
        .complete("analyze", None, &CompletionOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AnalyzerError::LLMApi(_)));
}

#[tokio::test]
async fn test_request_shape() {
    let (url, upstream) = spawn_upstream(vec![(200, completion("ok"))], Duration::ZERO).await;
    let options = CompletionOptions { max_tokens: 1234, temperature: 0.3, model: Some("deepseek-coder".into()) };

    provider(&url, fast_policy(1))
        .complete("the prompt", Some("the system"), &options)
        .await
        .unwrap();

    assert_eq!(upstream.last_auth.lock().unwrap().as_deref(), Some("Bearer sk-test-key-0001"));
    let body = upstream.last_body.lock().unwrap().clone().unwrap();
    assert_eq!(body["model"], "deepseek-coder");
    assert_eq!(body["max_tokens"], 1234);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], "the system");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], "the prompt");
}

#[tokio::test]
async fn test_api_maps_exhausted_rate_limit_to_429() {
    let (url, _) = spawn_upstream(vec![(429, error_body("Rate limit reached"))], Duration::ZERO).await;
    let provider: Arc<dyn LLMProvider> = Arc::new(provider(&url, fast_policy(2)));
    let state = AppState::new(Analyzer::new(Some(provider), CompletionOptions::default(), AnalysisConfig::default()));

    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header("content-type", "application/json")
        .body(Body::from(json!({"code": "class A {}"}).to_string()))
        .unwrap();
    let response = build_router(state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Rate limit exceeded");
}

#[tokio::test]
async fn test_api_end_to_end_with_malformed_model_output() {
    let (url, _) = spawn_upstream(vec![(200, completion("Here is my review: looks fine!"))], Duration::ZERO).await;
    let provider: Arc<dyn LLMProvider> = Arc::new(provider(&url, fast_policy(1)));
    let state = AppState::new(Analyzer::new(Some(provider), CompletionOptions::default(), AnalysisConfig::default()));

    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header("content-type", "application/json")
        .body(Body::from(json!({"code": "class A {\n}"}).to_string()))
        .unwrap();
    let response = build_router(state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["mode"], "live");
    assert_eq!(body["data"]["summary"]["total"], 1);
    assert_eq!(body["data"]["summary"]["low"], 1);
    assert_eq!(body["data"]["issues"][0]["severity"], "low");
    assert_eq!(body["data"]["metrics"]["linesOfCode"], 2);
}
