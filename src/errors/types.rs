use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Invalid input: {0}")]
    InputValidation(String),

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimit(String),

    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Billing/quota error: {0}")]
    Billing(String),

    #[error("LLM API error: {0}")]
    LLMApi(String),

    #[error("Response format error: {0}")]
    ResponseFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AnalyzerError {
    /// Replace any occurrence of `secret` in the error message with `[REDACTED]`.
    pub fn redact(self, secret: &str) -> Self {
        let scrub = |msg: String| crate::config::credentials::redact_credentials(&msg, &[secret]);
        match self {
            AnalyzerError::Credential(m) => AnalyzerError::Credential(scrub(m)),
            AnalyzerError::Authentication(m) => AnalyzerError::Authentication(scrub(m)),
            AnalyzerError::RateLimit(m) => AnalyzerError::RateLimit(scrub(m)),
            AnalyzerError::Upstream { status, message } => AnalyzerError::Upstream { status, message: scrub(message) },
            AnalyzerError::Network(m) => AnalyzerError::Network(scrub(m)),
            AnalyzerError::Timeout(m) => AnalyzerError::Timeout(scrub(m)),
            AnalyzerError::Billing(m) => AnalyzerError::Billing(scrub(m)),
            AnalyzerError::LLMApi(m) => AnalyzerError::LLMApi(scrub(m)),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_scrubs_message() {
        let err = AnalyzerError::Authentication("key sk-abcdef123456 is invalid".into())
            .redact("sk-abcdef123456");
        assert_eq!(err.to_string(), "Authentication error: key [REDACTED] is invalid");
    }

    #[test]
    fn test_redact_keeps_variant() {
        let err = AnalyzerError::Upstream { status: 503, message: "busy".into() }.redact("sk-abcdef123456");
        assert!(matches!(err, AnalyzerError::Upstream { status: 503, .. }));
    }
}
