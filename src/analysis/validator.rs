use crate::errors::AnalyzerError;
use crate::models::AnalysisRequest;

pub const MAX_FILE_NAME_CHARS: usize = 255;

/// Check that a request carries source text within the accepted size.
/// Length is measured in characters, not bytes.
pub fn validate_request(req: &AnalysisRequest, max_code_chars: usize) -> Result<(), AnalyzerError> {
    if req.code.trim().is_empty() {
        return Err(AnalyzerError::InputValidation("Code is required".into()));
    }

    let length = req.code.chars().count();
    if length > max_code_chars {
        return Err(AnalyzerError::InputValidation(format!(
            "Code is too long: {} characters (maximum {})",
            length, max_code_chars
        )));
    }

    if let Some(name) = &req.file_name {
        if name.chars().count() > MAX_FILE_NAME_CHARS {
            return Err(AnalyzerError::InputValidation(format!(
                "File name exceeds {} characters",
                MAX_FILE_NAME_CHARS
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_code_rejected() {
        let err = validate_request(&AnalysisRequest::new(""), 10_000).unwrap_err();
        assert!(matches!(err, AnalyzerError::InputValidation(_)));
    }

    #[test]
    fn test_whitespace_code_rejected() {
        assert!(validate_request(&AnalysisRequest::new(" \n\t "), 10_000).is_err());
    }

    #[test]
    fn test_limit_is_inclusive() {
        assert!(validate_request(&AnalysisRequest::new("a".repeat(10_000)), 10_000).is_ok());
        assert!(validate_request(&AnalysisRequest::new("a".repeat(10_001)), 10_000).is_err());
    }

    #[test]
    fn test_limit_counts_characters() {
        // 10_000 two-byte characters is 20_000 bytes but still within the limit
        assert!(validate_request(&AnalysisRequest::new("é".repeat(10_000)), 10_000).is_ok());
    }

    #[test]
    fn test_long_file_name_rejected() {
        let mut req = AnalysisRequest::new("class A {}");
        req.file_name = Some("a".repeat(MAX_FILE_NAME_CHARS + 1));
        assert!(validate_request(&req, 10_000).is_err());
    }
}
