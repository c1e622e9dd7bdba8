use std::sync::LazyLock;
use regex::Regex;
use crate::models::{Metrics, Summary};

pub const MIN_COMPLEXITY: u32 = 1;
pub const MAX_COMPLEXITY: u32 = 50;

static BRANCH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:if|for|while|catch|case)\b|&&|\|\||\?").unwrap()
});

/// Cyclomatic complexity estimate: one plus the number of branch points
/// (`if`, `for`, `while`, `catch`, `case`, `&&`, `||`, `?`), clamped to [1, 50].
pub fn estimate_complexity(code: &str) -> u32 {
    let branches = BRANCH_PATTERN.find_iter(code).count() as u32;
    branches.saturating_add(1).clamp(MIN_COMPLEXITY, MAX_COMPLEXITY)
}

pub fn count_lines(code: &str) -> u32 {
    code.split('\n').count() as u32
}

fn penalized(weights: [i64; 4], summary: &Summary) -> u8 {
    let penalty = weights[0] * summary.critical as i64
        + weights[1] * summary.high as i64
        + weights[2] * summary.medium as i64
        + weights[3] * summary.low as i64;
    (100 - penalty).clamp(0, 100) as u8
}

pub fn maintainability_score(summary: &Summary) -> u8 {
    penalized([20, 10, 5, 2], summary)
}

pub fn security_score(summary: &Summary) -> u8 {
    penalized([25, 15, 5, 1], summary)
}

/// All four metrics computed locally from the source and issue counts.
pub fn derive_metrics(code: &str, summary: &Summary) -> Metrics {
    Metrics {
        complexity: estimate_complexity(code),
        lines_of_code: count_lines(code),
        maintainability: maintainability_score(summary),
        security_score: security_score(summary),
    }
}
