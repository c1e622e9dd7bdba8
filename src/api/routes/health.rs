use std::sync::atomic::Ordering;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use crate::api::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let counters = &state.counters;
    let analyzer = &state.analyzer;

    Json(json!({
        "status": "healthy",
        "service": "deepcheck",
        "version": env!("CARGO_PKG_VERSION"),
        "build": option_env!("DEEPCHECK_BUILD_ID"),
        "builtAt": option_env!("DEEPCHECK_BUILT_AT"),
        "apiKeyConfigured": analyzer.has_provider(),
        "demoFallback": analyzer.demo_fallback(),
        "model": analyzer.model_name(),
        "maxCodeChars": analyzer.max_code_chars(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptimeSeconds": state.started_at.elapsed().as_secs(),
        "requests": {
            "total": counters.total.load(Ordering::Relaxed),
            "succeeded": counters.succeeded.load(Ordering::Relaxed),
            "failed": counters.failed.load(Ordering::Relaxed),
            "demo": counters.demo.load(Ordering::Relaxed),
        },
    }))
}
