use std::path::Path;
use crate::errors::AnalyzerError;
use crate::llm::catalog;
use super::types::ServiceConfig;
use tracing::{debug, warn};

const MAX_CONFIG_BYTES: u64 = 1_048_576;

/// Load configuration from an optional YAML file, then apply environment
/// overrides and validate the result.
pub async fn load_config(path: Option<&Path>) -> Result<ServiceConfig, AnalyzerError> {
    let mut config = match path {
        Some(path) => parse_config(path).await?,
        None => ServiceConfig::default(),
    };
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config)?;
    Ok(config)
}

pub async fn parse_config(path: &Path) -> Result<ServiceConfig, AnalyzerError> {
    if !path.exists() {
        return Err(AnalyzerError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(AnalyzerError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    if content.trim().is_empty() {
        debug!(path = %path.display(), "Config file is empty, using defaults");
        return Ok(ServiceConfig::default());
    }

    let config: ServiceConfig = serde_yaml::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Overlay environment variables onto a parsed config. `lookup` is the
/// environment accessor so callers can supply a fixed map.
pub fn apply_env_overrides<F>(config: &mut ServiceConfig, lookup: F) -> Result<(), AnalyzerError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(key) = non_empty(catalog::API_KEY_ENV) {
        config.llm.api_key = Some(key);
    }
    if let Some(url) = non_empty("DEEPSEEK_BASE_URL") {
        config.llm.base_url = url;
    }
    if let Some(model) = non_empty("DEEPSEEK_MODEL") {
        config.llm.model = model;
    }
    if let Some(host) = non_empty("HOST") {
        config.server.host = host;
    }
    if let Some(port) = non_empty("PORT") {
        config.server.port = port.trim().parse()
            .map_err(|_| AnalyzerError::Config(format!("PORT is not a valid port number: {}", port)))?;
    }
    if let Some(flag) = non_empty("DEMO_FALLBACK") {
        config.analysis.demo_fallback = match flag.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            other => {
                return Err(AnalyzerError::Config(format!("DEMO_FALLBACK must be a boolean, got '{}'", other)));
            }
        };
    }
    Ok(())
}

/// Reject settings the service cannot run with.
pub fn validate_config(config: &ServiceConfig) -> Result<(), AnalyzerError> {
    let llm = &config.llm;
    let retry = &llm.retry;

    if retry.max_attempts == 0 {
        return Err(AnalyzerError::Config("llm.retry.max_attempts must be at least 1".into()));
    }
    if retry.timeout_max_ms < retry.timeout_base_ms {
        return Err(AnalyzerError::Config(
            "llm.retry.timeout_max_ms must not be smaller than timeout_base_ms".into(),
        ));
    }
    if !(0.0..=2.0).contains(&llm.temperature) {
        return Err(AnalyzerError::Config(format!(
            "llm.temperature must be between 0 and 2, got {}",
            llm.temperature
        )));
    }
    if llm.max_tokens == 0 {
        return Err(AnalyzerError::Config("llm.max_tokens must be positive".into()));
    }
    if config.analysis.max_code_chars == 0 {
        return Err(AnalyzerError::Config("analysis.max_code_chars must be positive".into()));
    }
    if !llm.base_url.starts_with("http://") && !llm.base_url.starts_with("https://") {
        return Err(AnalyzerError::Config(format!("llm.base_url is not an HTTP URL: {}", llm.base_url)));
    }

    if catalog::get_model(&llm.model).is_none() {
        warn!(model = %llm.model, "Model is not in the DeepSeek catalog, passing it through unchanged");
    }

    Ok(())
}
