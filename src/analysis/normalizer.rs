use serde_json::{Map, Value};
use crate::errors::AnalyzerError;
use crate::models::{AnalysisResult, Issue, Metrics, Severity, Summary};
use crate::utils::truncation::truncate_excerpt;
use super::metrics::{self, MAX_COMPLEXITY, MIN_COMPLEXITY};
use tracing::warn;

pub const PARSE_FAILURE_TITLE: &str = "Unable to parse analysis response";

/// Turn raw model output into a well-formed result for `source`.
///
/// Never fails: output that contains no usable JSON object becomes a single
/// low-severity issue quoting the start of the raw text.
pub fn normalize(raw: &str, source: &str) -> AnalysisResult {
    match extract_json(raw) {
        Ok(Value::Object(obj)) => from_object(&obj, source),
        Ok(_) => parse_failure(raw, source),
        Err(e) => {
            warn!(error = %e, raw_len = raw.len(), "Model output was not valid JSON, returning parse-failure result");
            parse_failure(raw, source)
        }
    }
}

/// Extract a JSON object from model output: direct parse, then fenced
/// block contents, then the first balanced `{...}` substring that parses,
/// searching the fenced body before the full text.
pub fn extract_json(text: &str) -> Result<Value, AnalyzerError> {
    let trimmed = text.trim();
    if let Ok(v @ Value::Object(_)) = serde_json::from_str::<Value>(trimmed) {
        return Ok(v);
    }

    let unfenced = strip_code_fence(trimmed);
    let mut haystacks = vec![trimmed];
    if unfenced.len() != trimmed.len() {
        if let Ok(v @ Value::Object(_)) = serde_json::from_str::<Value>(unfenced) {
            return Ok(v);
        }
        // The report often follows a quoted snippet rather than sitting inside it.
        haystacks.insert(0, unfenced);
    }

    let mut last_error = None;
    for haystack in haystacks {
        for candidate in balanced_objects(haystack) {
            match serde_json::from_str::<Value>(candidate) {
                Ok(v @ Value::Object(_)) => return Ok(v),
                Ok(_) => {}
                Err(e) => last_error = Some(e),
            }
        }
    }

    Err(match last_error {
        Some(e) => AnalyzerError::ResponseFormat(format!("Invalid JSON extraction: {}", e)),
        None => AnalyzerError::ResponseFormat("No JSON object found in model output".into()),
    })
}

/// Every balanced `{...}` substring, in order of its opening brace.
fn balanced_objects(text: &str) -> impl Iterator<Item = &str> {
    text.match_indices('{')
        .filter_map(move |(start, _)| first_balanced_object(&text[start..]))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(start) = text.find("```") else {
        return text;
    };
    let after_fence = &text[start + 3..];
    // Skip the info string, e.g. "json"
    let body_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(0);
    let body = &after_fence[body_start..];
    match body.find("```") {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}

/// The first `{...}` substring whose braces balance, ignoring braces that
/// appear inside JSON string literals.
pub fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

fn from_object(obj: &Map<String, Value>, source: &str) -> AnalysisResult {
    let issues: Vec<Issue> = obj.get("issues")
        .or_else(|| obj.get("findings"))
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(parse_issue).collect())
        .unwrap_or_default();

    let suggestions = obj.get("suggestions")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(parse_suggestion).collect())
        .unwrap_or_default();

    let summary = Summary::from_issues(&issues);
    if let Some(claimed) = obj.get("summary").and_then(|s| s.get("total")).and_then(Value::as_u64) {
        if claimed != summary.total as u64 {
            warn!(claimed, actual = summary.total, "Model summary disagrees with its issue list, recomputing");
        }
    }

    let reported = obj.get("metrics").and_then(Value::as_object);
    let metrics = backfill_metrics(reported, source, &summary);
    AnalysisResult::new(issues, suggestions, metrics)
}

fn parse_issue(value: &Value) -> Option<Issue> {
    let obj = value.as_object()?;
    let severity = text_field(obj, &["severity", "level", "priority"])
        .map(|s| Severity::from_label(&s))
        .unwrap_or(Severity::Medium);

    Some(Issue {
        title: text_field(obj, &["title", "name", "type"]).unwrap_or_else(|| "Untitled issue".to_string()),
        severity,
        line: number_field(obj, &["line", "lineNumber", "line_number"])
            .map(|n| n.max(0.0).min(u32::MAX as f64) as u32)
            .unwrap_or(0),
        description: text_field(obj, &["description", "message", "details"]).unwrap_or_default(),
        category: text_field(obj, &["category"]),
        code: text_field(obj, &["code", "snippet", "codeSnippet"]),
        suggestion: text_field(obj, &["suggestion", "fix", "remediation", "recommendation"]),
    })
}

fn parse_suggestion(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Object(obj) => text_field(obj, &["text", "description", "suggestion"])?,
        _ => return None,
    };
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn backfill_metrics(reported: Option<&Map<String, Value>>, source: &str, summary: &Summary) -> Metrics {
    let field = |keys: &[&str]| reported.and_then(|obj| number_field(obj, keys));

    Metrics {
        complexity: field(&["complexity", "cyclomaticComplexity"])
            .map(|c| (c.round() as i64).clamp(MIN_COMPLEXITY as i64, MAX_COMPLEXITY as i64) as u32)
            .unwrap_or_else(|| metrics::estimate_complexity(source)),
        lines_of_code: field(&["linesOfCode", "lines_of_code", "lines"])
            .filter(|n| *n >= 0.0)
            .map(|n| n.round() as u32)
            .unwrap_or_else(|| metrics::count_lines(source)),
        maintainability: field(&["maintainability", "maintainabilityScore"])
            .map(clamp_score)
            .unwrap_or_else(|| metrics::maintainability_score(summary)),
        security_score: field(&["securityScore", "security_score", "security"])
            .map(clamp_score)
            .unwrap_or_else(|| metrics::security_score(summary)),
    }
}

fn clamp_score(score: f64) -> u8 {
    score.round().clamp(0.0, 100.0) as u8
}

fn text_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

/// Numbers, or strings that start with a number such as `"12"` or `"12-14"`.
fn number_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find_map(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => {
                let digits: String = s.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
                digits.parse::<f64>().ok()
            }
            _ => None,
        })
        .filter(|n| n.is_finite())
}

fn parse_failure(raw: &str, source: &str) -> AnalysisResult {
    let issue = Issue {
        title: PARSE_FAILURE_TITLE.to_string(),
        severity: Severity::Low,
        line: 0,
        description: format!(
            "The analysis service returned a response that could not be parsed. Raw excerpt: {}",
            truncate_excerpt(raw)
        ),
        category: None,
        code: None,
        suggestion: Some("Run the analysis again; model output varies between requests.".to_string()),
    };
    let issues = vec![issue];
    let summary = Summary::from_issues(&issues);
    AnalysisResult::new(issues, Vec::new(), metrics::derive_metrics(source, &summary))
}
