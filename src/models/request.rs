use serde::{Deserialize, Serialize};

/// Which categories of checks the caller asked for. Every flag defaults to on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckOptions {
    pub security: bool,
    pub performance: bool,
    pub bugs: bool,
    pub style: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self { security: true, performance: true, bugs: true, style: true }
    }
}

impl CheckOptions {
    /// Names of the enabled categories. A request that disables everything
    /// is treated as asking for all of them.
    pub fn enabled(&self) -> Vec<&'static str> {
        let flags = [
            ("security", self.security),
            ("performance", self.performance),
            ("bugs", self.bugs),
            ("style", self.style),
        ];
        let enabled: Vec<&'static str> = flags.iter().filter(|(_, on)| *on).map(|(name, _)| *name).collect();
        if enabled.is_empty() {
            flags.iter().map(|(name, _)| *name).collect()
        } else {
            enabled
        }
    }

    pub fn is_enabled(&self, category: &str) -> bool {
        self.enabled().contains(&category)
    }
}

/// Body of `POST /api/analyze` and `POST /api/analyze/demo`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub options: CheckOptions,
    #[serde(default)]
    pub file_name: Option<String>,
}

impl AnalysisRequest {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into(), ..Default::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default_to_all_enabled() {
        let req: AnalysisRequest = serde_json::from_str(r#"{"code": "class A {}"}"#).unwrap();
        assert_eq!(req.options, CheckOptions::default());
        assert_eq!(req.options.enabled().len(), 4);
        assert!(req.file_name.is_none());
    }

    #[test]
    fn test_partial_options_keep_missing_flags_on() {
        let req: AnalysisRequest =
            serde_json::from_str(r#"{"code": "x", "options": {"style": false}, "fileName": "A.java"}"#).unwrap();
        assert!(!req.options.style);
        assert!(req.options.security);
        assert_eq!(req.options.enabled(), vec!["security", "performance", "bugs"]);
        assert_eq!(req.file_name.as_deref(), Some("A.java"));
    }

    #[test]
    fn test_all_disabled_means_all_enabled() {
        let options = CheckOptions { security: false, performance: false, bugs: false, style: false };
        assert!(options.is_enabled("style"));
        assert_eq!(options.enabled().len(), 4);
    }
}
