use serde::{Deserialize, Serialize};
use super::finding::{Issue, Severity};

/// Per-severity issue counts. `total` is always the sum of the four levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
    pub total: u32,
}

impl Summary {
    pub fn from_issues(issues: &[Issue]) -> Self {
        let mut summary = Summary::default();
        for issue in issues {
            match issue.severity {
                Severity::Critical => summary.critical += 1,
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
            }
        }
        summary.total = summary.critical + summary.high + summary.medium + summary.low;
        summary
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub complexity: u32,
    pub lines_of_code: u32,
    /// 0-100
    pub maintainability: u8,
    /// 0-100
    pub security_score: u8,
}

/// The report returned for one analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: Summary,
    pub issues: Vec<Issue>,
    pub suggestions: Vec<String>,
    pub metrics: Metrics,
}

impl AnalysisResult {
    /// Build a result whose summary is derived from `issues`.
    pub fn new(issues: Vec<Issue>, suggestions: Vec<String>, metrics: Metrics) -> Self {
        Self {
            summary: Summary::from_issues(&issues),
            issues,
            suggestions,
            metrics,
        }
    }

    /// Issues sorted most severe first, preserving the original order within a level.
    pub fn issues_by_severity(&self) -> Vec<&Issue> {
        let mut sorted: Vec<&Issue> = self.issues.iter().collect();
        sorted.sort_by_key(|issue| issue.severity.rank());
        sorted
    }
}
