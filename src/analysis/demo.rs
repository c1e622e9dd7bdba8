//! Synthetic analysis results for running without an API key.
//!
//! Findings come from a handful of line-level patterns, padded with canned
//! findings at random lines so every demo result looks like a real review.

use std::sync::LazyLock;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use crate::models::{AnalysisResult, CheckOptions, Issue, Severity, Summary};
use crate::utils::truncation::truncate_chars;
use super::metrics;

pub const MAX_DEMO_ISSUES: usize = 6;
const MAX_SNIPPET_CHARS: usize = 120;

struct DemoRule {
    category: &'static str,
    severity: Severity,
    title: &'static str,
    description: &'static str,
    suggestion: &'static str,
    pattern: Regex,
}

struct CannedFinding {
    category: &'static str,
    severity: Severity,
    title: &'static str,
    description: &'static str,
    suggestion: &'static str,
}

fn rule(
    category: &'static str,
    severity: Severity,
    title: &'static str,
    description: &'static str,
    suggestion: &'static str,
    pattern: &str,
) -> DemoRule {
    DemoRule { category, severity, title, description, suggestion, pattern: Regex::new(pattern).unwrap() }
}

static RULES: LazyLock<Vec<DemoRule>> = LazyLock::new(|| {
    vec![
        rule(
            "security", Severity::Critical,
            "SQL injection via string concatenation",
            "A SQL statement is assembled by concatenating values into the query string.",
            "Use a PreparedStatement with bind parameters.",
            r#"(?i)"\s*(select|insert|update|delete)\b[^"]*"\s*\+"#,
        ),
        rule(
            "security", Severity::High,
            "Hard-coded credential",
            "A secret value is embedded in source code and will leak with the binary.",
            "Load secrets from the environment or a secret store.",
            r#"(?i)\b\w*(password|passwd|secret|apikey|api_key|token)\w*\s*=\s*"[^"]+""#,
        ),
        rule(
            "bugs", Severity::Medium,
            "String compared with ==",
            "== compares references, not string contents.",
            "Use equals() or Objects.equals().",
            r#"(\w\s*==\s*"|"\s*==\s*\w)"#,
        ),
        rule(
            "bugs", Severity::Medium,
            "Empty catch block",
            "The exception is silently swallowed, hiding failures.",
            "Log the exception or rethrow it with context.",
            r"catch\s*\([^)]*\)\s*\{\s*\}",
        ),
        rule(
            "bugs", Severity::Low,
            "Overly broad exception handler",
            "Catching Exception or Throwable also catches programming errors.",
            "Catch the specific exception types the block can handle.",
            r"catch\s*\(\s*(final\s+)?(Exception|Throwable)\b",
        ),
        rule(
            "performance", Severity::Medium,
            "String concatenation in a loop",
            "Repeated += on a String allocates a new object on every iteration.",
            "Accumulate into a StringBuilder.",
            r#"\w+\s*\+=\s*("|\w+\s*\+\s*")"#,
        ),
        rule(
            "performance", Severity::Low,
            "Blocking sleep",
            "Thread.sleep blocks the current thread and is often used to paper over races.",
            "Use a scheduled executor or proper synchronization.",
            r"Thread\.sleep\s*\(",
        ),
        rule(
            "style", Severity::Low,
            "Console output instead of logging",
            "System.out/System.err bypass the logging framework.",
            "Use a logger such as SLF4J.",
            r"System\.(out|err)\.print",
        ),
        rule(
            "style", Severity::Low,
            "printStackTrace call",
            "Stack traces printed to stderr are lost in production.",
            "Pass the exception to a logger.",
            r"\.printStackTrace\s*\(\s*\)",
        ),
    ]
});

const CANNED: &[CannedFinding] = &[
    CannedFinding {
        category: "security", severity: Severity::Medium,
        title: "Missing input validation",
        description: "External input reaches business logic without validation.",
        suggestion: "Validate and normalize input at the boundary.",
    },
    CannedFinding {
        category: "security", severity: Severity::Low,
        title: "Sensitive data in exception message",
        description: "Exception messages may expose internal details to callers.",
        suggestion: "Return generic messages and log details server-side.",
    },
    CannedFinding {
        category: "performance", severity: Severity::Low,
        title: "Collection created without initial capacity",
        description: "The collection will be resized repeatedly as it grows.",
        suggestion: "Pass an expected size to the constructor.",
    },
    CannedFinding {
        category: "performance", severity: Severity::Medium,
        title: "Repeated computation inside loop",
        description: "A loop-invariant value is recomputed on each iteration.",
        suggestion: "Hoist the computation out of the loop.",
    },
    CannedFinding {
        category: "bugs", severity: Severity::High,
        title: "Possible null dereference",
        description: "A value that can be null is dereferenced without a check.",
        suggestion: "Add a null check or use Optional.",
    },
    CannedFinding {
        category: "bugs", severity: Severity::Medium,
        title: "Resource not closed",
        description: "A stream or connection may not be closed on every path.",
        suggestion: "Use try-with-resources.",
    },
    CannedFinding {
        category: "style", severity: Severity::Low,
        title: "Magic number",
        description: "A numeric literal is used without explanation.",
        suggestion: "Extract it into a named constant.",
    },
    CannedFinding {
        category: "style", severity: Severity::Low,
        title: "Method too long",
        description: "The method does several things and is hard to follow.",
        suggestion: "Split it into smaller, well-named methods.",
    },
];

const GENERAL_SUGGESTIONS: &[(&str, &str)] = &[
    ("security", "Review all places where external input reaches SQL, file or process APIs."),
    ("security", "Keep credentials out of source control."),
    ("performance", "Profile hot paths before optimizing."),
    ("performance", "Prefer StringBuilder for string assembly in loops."),
    ("bugs", "Add unit tests for edge cases such as null and empty inputs."),
    ("bugs", "Use try-with-resources for everything that implements AutoCloseable."),
    ("style", "Adopt a consistent formatter and logging framework."),
    ("style", "Keep methods short and focused on one task."),
];

pub fn generate(code: &str, options: &CheckOptions) -> AnalysisResult {
    generate_with_rng(code, options, &mut rand::thread_rng())
}

/// Build a demo result. No I/O is performed; the work is bounded by the
/// number of source lines times the fixed rule set.
pub fn generate_with_rng<R: Rng>(code: &str, options: &CheckOptions, rng: &mut R) -> AnalysisResult {
    let mut issues = pattern_findings(code, options);
    issues.truncate(MAX_DEMO_ISSUES);

    let line_count = metrics::count_lines(code).max(1);
    let target = rng.gen_range(2..=4).max(issues.len());
    let mut pool: Vec<&CannedFinding> = CANNED.iter()
        .filter(|f| options.is_enabled(f.category))
        .collect();
    pool.shuffle(rng);

    for finding in pool {
        if issues.len() >= target {
            break;
        }
        issues.push(Issue {
            title: finding.title.to_string(),
            severity: finding.severity,
            line: rng.gen_range(1..=line_count),
            description: finding.description.to_string(),
            category: Some(finding.category.to_string()),
            code: None,
            suggestion: Some(finding.suggestion.to_string()),
        });
    }
    issues.sort_by_key(|issue| issue.line);

    let mut suggestions: Vec<String> = GENERAL_SUGGESTIONS.iter()
        .filter(|(category, _)| options.is_enabled(category))
        .map(|(_, text)| text.to_string())
        .collect();
    suggestions.shuffle(rng);
    suggestions.truncate(3);

    let metrics = metrics::derive_metrics(code, &Summary::from_issues(&issues));
    AnalysisResult::new(issues, suggestions, metrics)
}

/// One issue per matching rule, at the first line the rule matches.
fn pattern_findings(code: &str, options: &CheckOptions) -> Vec<Issue> {
    RULES.iter()
        .filter(|rule| options.is_enabled(rule.category))
        .filter_map(|rule| {
            code.split('\n')
                .enumerate()
                .find(|(_, line)| rule.pattern.is_match(line))
                .map(|(idx, line)| Issue {
                    title: rule.title.to_string(),
                    severity: rule.severity,
                    line: idx as u32 + 1,
                    description: rule.description.to_string(),
                    category: Some(rule.category.to_string()),
                    code: Some(truncate_chars(line.trim(), MAX_SNIPPET_CHARS)),
                    suggestion: Some(rule.suggestion.to_string()),
                })
        })
        .collect()
}
