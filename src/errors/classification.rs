use super::types::AnalyzerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
}

impl ErrorClassification {
    const fn retryable(error_type: &'static str) -> Self {
        Self { error_type, retryable: true }
    }

    const fn fatal(error_type: &'static str) -> Self {
        Self { error_type, retryable: false }
    }
}

impl AnalyzerError {
    /// Classify this error to determine its type and whether the upstream
    /// call that produced it may be attempted again.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            AnalyzerError::RateLimit(_) => ErrorClassification::retryable("RateLimitError"),
            AnalyzerError::Upstream { .. } => ErrorClassification::retryable("TransientUpstreamError"),
            AnalyzerError::Network(_) => ErrorClassification::retryable("NetworkError"),
            AnalyzerError::Timeout(_) => ErrorClassification::retryable("TimeoutError"),

            AnalyzerError::InputValidation(_) => ErrorClassification::fatal("InputValidationError"),
            AnalyzerError::Credential(_) => ErrorClassification::fatal("CredentialError"),
            AnalyzerError::Authentication(_) => ErrorClassification::fatal("AuthenticationError"),
            AnalyzerError::Billing(_) => ErrorClassification::fatal("BillingError"),
            AnalyzerError::LLMApi(_) => ErrorClassification::fatal("LLMApiError"),
            AnalyzerError::ResponseFormat(_) => ErrorClassification::fatal("ResponseFormatError"),
            AnalyzerError::Config(_) => ErrorClassification::fatal("ConfigError"),
            AnalyzerError::Io(_) => ErrorClassification::fatal("IoError"),
            AnalyzerError::Json(_) => ErrorClassification::fatal("JsonError"),
            AnalyzerError::Yaml(_) => ErrorClassification::fatal("YamlError"),
            AnalyzerError::Internal(_) => ErrorClassification::fatal("InternalError"),
        }
    }
}
