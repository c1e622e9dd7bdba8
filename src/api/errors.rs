use axum::{http::StatusCode, response::IntoResponse, Json};
use crate::errors::AnalyzerError;
use super::models::ErrorResponse;
use tracing::error;

impl AnalyzerError {
    /// HTTP status and short error label for the response envelope.
    pub fn status_and_label(&self) -> (StatusCode, &'static str) {
        match self {
            AnalyzerError::InputValidation(_) => (StatusCode::BAD_REQUEST, "Invalid input"),
            AnalyzerError::Credential(_) => (StatusCode::SERVICE_UNAVAILABLE, "API key not configured"),
            AnalyzerError::Authentication(_) => (StatusCode::UNAUTHORIZED, "Invalid API key"),
            AnalyzerError::RateLimit(_) => (StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded"),
            AnalyzerError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "Analysis timed out"),
            AnalyzerError::Upstream { .. } | AnalyzerError::Network(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "Analysis service unavailable")
            }
            AnalyzerError::Billing(_) => (StatusCode::PAYMENT_REQUIRED, "Insufficient API balance"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Analysis failed"),
        }
    }
}

impl IntoResponse for AnalyzerError {
    fn into_response(self) -> axum::response::Response {
        let (status, label) = self.status_and_label();

        let details = match &self {
            AnalyzerError::Io(_)
            | AnalyzerError::Json(_)
            | AnalyzerError::Yaml(_)
            | AnalyzerError::Config(_)
            | AnalyzerError::Internal(_) => {
                error!(error = %self, "Internal error while handling request");
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        };

        let body = ErrorResponse {
            success: false,
            error: label.to_string(),
            details,
        };
        (status, Json(body)).into_response()
    }
}
