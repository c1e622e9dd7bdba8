use serde::{Deserialize, Serialize};

/// Severity level for a reported issue, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Returns a numeric rank where lower values indicate higher severity.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::High => 1,
            Severity::Medium => 2,
            Severity::Low => 3,
        }
    }

    /// Map a free-form severity label produced by a model onto the four
    /// supported levels. Unrecognized labels become `Medium`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "critical" | "fatal" => Severity::Critical,
            "high" | "error" | "blocker" | "severe" => Severity::High,
            "medium" | "moderate" | "warning" | "major" => Severity::Medium,
            "low" | "info" | "minor" | "note" | "suggestion" | "trivial" => Severity::Low,
            _ => Severity::Medium,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        };
        f.write_str(label)
    }
}

/// A single defect reported for the submitted source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub title: String,
    pub severity: Severity,
    /// 1-based source line; 0 when the location is unknown.
    pub line: u32,
    pub description: String,
    /// Check category the issue belongs to (security, performance, bugs, style).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Offending code excerpt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Remediation text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_labels() {
        assert_eq!(Severity::from_label("CRITICAL"), Severity::Critical);
        assert_eq!(Severity::from_label("error"), Severity::High);
        assert_eq!(Severity::from_label("Blocker"), Severity::High);
        assert_eq!(Severity::from_label(" warning "), Severity::Medium);
        assert_eq!(Severity::from_label("info"), Severity::Low);
        assert_eq!(Severity::from_label("whatever"), Severity::Medium);
    }

    #[test]
    fn test_severity_rank_order() {
        assert!(Severity::Critical.rank() < Severity::High.rank());
        assert!(Severity::Medium.rank() < Severity::Low.rank());
    }

    #[test]
    fn test_issue_serializes_camel_case_without_empty_options() {
        let issue = Issue {
            title: "Empty catch block".into(),
            severity: Severity::Low,
            line: 12,
            description: "Exception is swallowed".into(),
            category: None,
            code: None,
            suggestion: Some("Log the exception".into()),
        };
        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(value["severity"], "low");
        assert_eq!(value["suggestion"], "Log the exception");
        assert!(value.get("code").is_none());
    }
}
