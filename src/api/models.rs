use serde::Serialize;
use crate::analysis::{AnalysisMode, AnalysisOutcome};
use crate::llm::Usage;
use crate::models::AnalysisResult;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    pub data: AnalysisResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub mode: AnalysisMode,
}

impl AnalyzeResponse {
    pub fn from_outcome(outcome: AnalysisOutcome, request_id: String) -> Self {
        Self {
            success: true,
            data: outcome.result,
            usage: outcome.usage,
            request_id,
            model: outcome.model,
            mode: outcome.mode,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub details: String,
}
