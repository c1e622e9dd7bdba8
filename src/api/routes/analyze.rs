use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use crate::analysis::AnalysisOutcome;
use crate::api::models::AnalyzeResponse;
use crate::api::AppState;
use crate::errors::AnalyzerError;
use crate::models::AnalysisRequest;
use tracing::{info, warn};

pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AnalyzerError> {
    let request_id = uuid::Uuid::new_v4().to_string();
    state.counters.record_start();

    let outcome = match parse_body(payload) {
        Ok(req) => {
            info!(
                request_id = %request_id,
                code_chars = req.code.chars().count(),
                file_name = req.file_name.as_deref().unwrap_or("-"),
                "Analysis requested"
            );
            state.analyzer.analyze(&req).await
        }
        Err(e) => Err(e),
    };

    finish(&state, outcome, request_id)
}

pub async fn analyze_demo(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AnalyzerError> {
    let request_id = uuid::Uuid::new_v4().to_string();
    state.counters.record_start();

    let outcome = parse_body(payload).and_then(|req| state.analyzer.analyze_demo(&req));
    finish(&state, outcome, request_id)
}

fn parse_body(payload: Result<Json<AnalysisRequest>, JsonRejection>) -> Result<AnalysisRequest, AnalyzerError> {
    payload
        .map(|Json(req)| req)
        .map_err(|rejection| AnalyzerError::InputValidation(format!("Invalid request body: {}", rejection.body_text())))
}

fn finish(
    state: &AppState,
    outcome: Result<AnalysisOutcome, AnalyzerError>,
    request_id: String,
) -> Result<Json<AnalyzeResponse>, AnalyzerError> {
    match outcome {
        Ok(outcome) => {
            state.counters.record_success(outcome.mode);
            Ok(Json(AnalyzeResponse::from_outcome(outcome, request_id)))
        }
        Err(e) => {
            state.counters.record_failure();
            let class = e.classify();
            warn!(request_id = %request_id, error_type = class.error_type, error = %e, "Analysis failed");
            Err(e)
        }
    }
}
