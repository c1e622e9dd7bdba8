use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use crate::errors::{with_retry, AnalyzerError, RetryPolicy};
use crate::utils::truncation::truncate_error;
use super::catalog;
use super::provider::LLMProvider;
use super::types::{ChatCompletionRequest, ChatCompletionResponse, CompletionOptions, LLMResponse, Message};
use tracing::debug;

pub struct DeepSeekProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    retry: RetryPolicy,
}

impl DeepSeekProvider {
    pub fn new(api_key: &str, model: Option<&str>) -> Self {
        Self::with_base_url(api_key, model, catalog::DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: &str, model: Option<&str>, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.unwrap_or(catalog::default_model()).to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn send_once(
        &self,
        body: &ChatCompletionRequest<'_>,
        attempt: u32,
    ) -> Result<LLMResponse, AnalyzerError> {
        let timeout = self.retry.attempt_timeout(attempt);
        debug!(attempt, timeout_ms = timeout.as_millis() as u64, model = body.model, "DeepSeek request");

        let resp = self.client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(&e, timeout))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(status_error(status, &text));
        }

        let data: ChatCompletionResponse = resp.json().await.map_err(|e| {
            if e.is_timeout() {
                transport_error(&e, timeout)
            } else {
                AnalyzerError::LLMApi(format!("Failed to parse DeepSeek response: {}", e))
            }
        })?;

        let content = data.choices.into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| AnalyzerError::LLMApi("No content in DeepSeek response".into()))?;

        let usage = data.usage.map(Into::into);
        debug!(model = %self.model, ?usage, "DeepSeek completion");

        Ok(LLMResponse {
            content,
            usage,
            model: data.model.unwrap_or_else(|| body.model.to_string()),
        })
    }
}

#[async_trait]
impl LLMProvider for DeepSeekProvider {
    async fn complete(
        &self,
        prompt: &str,
        system: Option<&str>,
        options: &CompletionOptions,
    ) -> Result<LLMResponse, AnalyzerError> {
        let mut messages = Vec::new();
        if let Some(sys) = system {
            messages.push(Message::system(sys));
        }
        messages.push(Message::user(prompt));

        let body = ChatCompletionRequest {
            model: options.model.as_deref().unwrap_or(&self.model),
            messages,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        };

        with_retry("deepseek.complete", &self.retry, |attempt| self.send_once(&body, attempt))
            .await
            .map_err(|e| e.redact(&self.api_key))
    }

    fn provider_name(&self) -> &str { catalog::PROVIDER_ID }
    fn model_name(&self) -> &str { &self.model }
}

fn transport_error(err: &reqwest::Error, timeout: Duration) -> AnalyzerError {
    if err.is_timeout() {
        AnalyzerError::Timeout(format!("DeepSeek did not respond within {}s", timeout.as_secs()))
    } else {
        AnalyzerError::Network(format!("DeepSeek request failed: {}", err))
    }
}

/// Map a non-success HTTP status from the upstream API onto the error taxonomy.
pub(crate) fn status_error(status: StatusCode, body: &str) -> AnalyzerError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| truncate_error(body));

    match status.as_u16() {
        401 | 403 => AnalyzerError::Authentication(format!("DeepSeek rejected the API key: {}", message)),
        402 => AnalyzerError::Billing(message),
        429 => AnalyzerError::RateLimit(format!("DeepSeek rate limit exceeded: {}", message)),
        s if s >= 500 => AnalyzerError::Upstream { status: s, message },
        s => AnalyzerError::LLMApi(format!("DeepSeek returned {}: {}", s, message)),
    }
}
