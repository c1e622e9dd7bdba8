use async_trait::async_trait;
use crate::errors::AnalyzerError;
use super::types::{CompletionOptions, LLMResponse};

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Free-form chat completion, including any retries the provider performs
    async fn complete(
        &self,
        prompt: &str,
        system: Option<&str>,
        options: &CompletionOptions,
    ) -> Result<LLMResponse, AnalyzerError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;

    /// Model identifier
    fn model_name(&self) -> &str;
}
