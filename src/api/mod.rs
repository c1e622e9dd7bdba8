pub mod routes;
pub mod models;
pub mod errors;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::analysis::{AnalysisMode, Analyzer};
use crate::config::ServiceConfig;

/// Process-wide request counters reported by the health endpoint.
#[derive(Debug, Default)]
pub struct RequestCounters {
    pub total: AtomicU64,
    pub succeeded: AtomicU64,
    pub failed: AtomicU64,
    pub demo: AtomicU64,
}

impl RequestCounters {
    pub fn record_start(&self) {
        self.total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_success(&self, mode: AnalysisMode) {
        self.succeeded.fetch_add(1, Ordering::Relaxed);
        if mode == AnalysisMode::Demo {
            self.demo.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }
}

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub counters: Arc<RequestCounters>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            counters: Arc::new(RequestCounters::default()),
            started_at: Instant::now(),
        }
    }
}

pub fn create_app_state(config: &ServiceConfig) -> AppState {
    AppState::new(Analyzer::from_config(config))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", axum::routing::get(routes::health::health_check))
        .route("/api/analyze", axum::routing::post(routes::analyze::analyze))
        .route("/api/analyze/demo", axum::routing::post(routes::analyze::analyze_demo))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
