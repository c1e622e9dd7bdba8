use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::errors::RetryPolicy;
use crate::llm::catalog;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub llm: LLMConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 3000 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LLMConfig {
    /// Literal key or `$ENV_VAR` reference.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub retry: RetryConfig,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: catalog::DEFAULT_BASE_URL.to_string(),
            model: catalog::default_model().to_string(),
            max_tokens: 4000,
            temperature: 0.1,
            retry: RetryConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub rate_limit_multiplier: u32,
    pub timeout_base_ms: u64,
    pub timeout_increment_ms: u64,
    pub timeout_max_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
            rate_limit_multiplier: 2,
            timeout_base_ms: 30_000,
            timeout_increment_ms: 15_000,
            timeout_max_ms: 90_000,
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_millis(self.base_delay_ms),
            rate_limit_multiplier: self.rate_limit_multiplier,
            timeout_base: Duration::from_millis(self.timeout_base_ms),
            timeout_increment: Duration::from_millis(self.timeout_increment_ms),
            timeout_max: Duration::from_millis(self.timeout_max_ms),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Maximum accepted source length, in characters.
    pub max_code_chars: usize,
    /// Serve demo data from `/api/analyze` when no usable API key is configured.
    pub demo_fallback: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { max_code_chars: 10_000, demo_fallback: true }
    }
}
