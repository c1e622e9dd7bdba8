use std::sync::Arc;
use serde::Serialize;
use crate::config::{AnalysisConfig, ServiceConfig};
use crate::errors::AnalyzerError;
use crate::llm::{CompletionOptions, DeepSeekProvider, LLMProvider, Usage};
use crate::models::{AnalysisRequest, AnalysisResult};
use super::{demo, normalizer, prompt, validator};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Live,
    Demo,
}

#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    pub usage: Option<Usage>,
    pub model: Option<String>,
    pub mode: AnalysisMode,
}

/// Runs one analysis request end to end. Holds no per-request state.
pub struct Analyzer {
    provider: Option<Arc<dyn LLMProvider>>,
    completion: CompletionOptions,
    settings: AnalysisConfig,
}

impl Analyzer {
    pub fn new(
        provider: Option<Arc<dyn LLMProvider>>,
        completion: CompletionOptions,
        settings: AnalysisConfig,
    ) -> Self {
        Self { provider, completion, settings }
    }

    /// Build an analyzer backed by DeepSeek when the config carries a usable
    /// API key, and by nothing (demo only) otherwise.
    pub fn from_config(config: &ServiceConfig) -> Self {
        let llm = &config.llm;
        let provider = llm.usable_api_key().map(|key| {
            let provider = DeepSeekProvider::with_base_url(&key, Some(&llm.model), &llm.base_url)
                .with_retry_policy(llm.retry.policy());
            Arc::new(provider) as Arc<dyn LLMProvider>
        });
        if provider.is_none() {
            info!("No usable DeepSeek API key configured");
        }

        let completion = CompletionOptions {
            max_tokens: llm.max_tokens,
            temperature: llm.temperature,
            model: None,
        };
        Self::new(provider, completion, config.analysis.clone())
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn demo_fallback(&self) -> bool {
        self.settings.demo_fallback
    }

    pub fn max_code_chars(&self) -> usize {
        self.settings.max_code_chars
    }

    pub fn model_name(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.model_name())
    }

    /// Analyze with the LLM, falling back to demo data when no provider is
    /// configured and fallback is enabled.
    pub async fn analyze(&self, req: &AnalysisRequest) -> Result<AnalysisOutcome, AnalyzerError> {
        validator::validate_request(req, self.settings.max_code_chars)?;

        let Some(provider) = self.provider.as_deref() else {
            if self.settings.demo_fallback {
                info!("Serving demo analysis in place of live analysis");
                return Ok(self.demo_outcome(req));
            }
            return Err(AnalyzerError::Credential(
                "DeepSeek API key is not configured; set DEEPSEEK_API_KEY".into(),
            ));
        };

        let prompt = prompt::build_prompt(req);
        debug!(
            provider = provider.provider_name(),
            prompt_chars = prompt.user.len(),
            categories = ?req.options.enabled(),
            "Requesting analysis"
        );

        let response = provider.complete(&prompt.user, Some(&prompt.system), &self.completion).await?;
        let result = normalizer::normalize(&response.content, &req.code);

        info!(
            model = %response.model,
            issues = result.summary.total,
            total_tokens = response.usage.map(|u| u.total_tokens),
            "Analysis complete"
        );

        Ok(AnalysisOutcome {
            result,
            usage: response.usage,
            model: Some(response.model),
            mode: AnalysisMode::Live,
        })
    }

    /// Demo analysis; never touches the network.
    pub fn analyze_demo(&self, req: &AnalysisRequest) -> Result<AnalysisOutcome, AnalyzerError> {
        validator::validate_request(req, self.settings.max_code_chars)?;
        Ok(self.demo_outcome(req))
    }

    fn demo_outcome(&self, req: &AnalysisRequest) -> AnalysisOutcome {
        AnalysisOutcome {
            result: demo::generate(&req.code, &req.options),
            usage: None,
            model: None,
            mode: AnalysisMode::Demo,
        }
    }
}
