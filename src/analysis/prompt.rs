use std::sync::LazyLock;
use regex::{Captures, Regex};
use crate::models::AnalysisRequest;

const SYSTEM_PROMPT: &str = "You are a senior Java engineer performing static code review. \
Report concrete defects only, reference exact line numbers from the numbered listing, \
and respond with a single JSON object and nothing else.";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{([A-Z_]+)\}\}").unwrap());

const ANALYSIS_TEMPLATE: &str = r#"Analyze the following Java code{{FILE_NAME}}.

Focus on these categories: {{CATEGORIES}}.
{{CATEGORY_GUIDANCE}}
Return ONLY valid JSON with exactly this structure:
{
  "summary": {"critical": 0, "high": 0, "medium": 0, "low": 0, "total": 0},
  "issues": [
    {
      "title": "short name of the problem",
      "severity": "critical|high|medium|low",
      "line": 1,
      "category": "security|performance|bugs|style",
      "description": "what is wrong and why it matters",
      "code": "the offending code",
      "suggestion": "how to fix it"
    }
  ],
  "suggestions": ["general improvement note"],
  "metrics": {"complexity": 1, "linesOfCode": {{LINE_COUNT}}, "maintainability": 100, "securityScore": 100}
}

Code:
```java
{{CODE}}
```"#;

/// Variables available for interpolation into the analysis template.
#[derive(Debug, Clone, Default)]
pub struct PromptVariables {
    pub code: String,
    pub categories: Vec<&'static str>,
    pub file_name: Option<String>,
}

impl PromptVariables {
    pub fn from_request(req: &AnalysisRequest) -> Self {
        Self {
            code: req.code.clone(),
            categories: req.options.enabled(),
            file_name: req.file_name.clone().filter(|name| !name.trim().is_empty()),
        }
    }
}

/// A system instruction plus the user message sent to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

pub fn build_prompt(req: &AnalysisRequest) -> Prompt {
    Prompt {
        system: SYSTEM_PROMPT.to_string(),
        user: interpolate(ANALYSIS_TEMPLATE, &PromptVariables::from_request(req)),
    }
}

/// Replace {{VARIABLE}} placeholders with values from PromptVariables.
/// Substitution is a single pass over the template, so placeholders inside
/// the file name or the code are never expanded. Unknown placeholders are
/// left as they are.
pub fn interpolate(template: &str, vars: &PromptVariables) -> String {
    let file_name = vars.file_name.as_deref().map(|n| format!(" from file `{}`", n)).unwrap_or_default();
    let guidance: String = vars.categories.iter()
        .filter_map(|c| category_guidance(c))
        .map(|line| format!("- {}\n", line))
        .collect();

    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match &caps[1] {
            "FILE_NAME" => file_name.clone(),
            "CATEGORIES" => vars.categories.join(", "),
            "CATEGORY_GUIDANCE" => guidance.clone(),
            "LINE_COUNT" => vars.code.split('\n').count().to_string(),
            "CODE" => number_lines(&vars.code),
            _ => caps[0].to_string(),
        })
        .into_owned()
}

fn category_guidance(category: &str) -> Option<&'static str> {
    match category {
        "security" => Some("security: injection, hard-coded secrets, unsafe deserialization, weak crypto, missing input validation"),
        "performance" => Some("performance: needless allocations, string concatenation in loops, blocking calls, inefficient collections"),
        "bugs" => Some("bugs: null dereferences, resource leaks, wrong equality checks, swallowed exceptions, concurrency errors"),
        "style" => Some("style: naming, dead code, magic numbers, console logging, overly long methods"),
        _ => None,
    }
}

/// Prefix each line with its 1-based number so reported lines line up.
fn number_lines(code: &str) -> String {
    code.split('\n')
        .enumerate()
        .map(|(i, line)| format!("{:>4} | {}", i + 1, line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CheckOptions;

    #[test]
    fn test_prompt_contains_numbered_code() {
        let prompt = build_prompt(&AnalysisRequest::new("class A {\n}"));
        assert!(prompt.user.contains("   1 | class A {"));
        assert!(prompt.user.contains("   2 | }"));
        assert!(prompt.system.contains("JSON"));
    }

    #[test]
    fn test_prompt_lists_only_enabled_categories() {
        let mut req = AnalysisRequest::new("class A {}");
        req.options = CheckOptions { security: true, performance: false, bugs: false, style: true };
        let prompt = build_prompt(&req);
        assert!(prompt.user.contains("Focus on these categories: security, style."));
        assert!(!prompt.user.contains("- performance:"));
    }

    #[test]
    fn test_prompt_includes_file_name() {
        let mut req = AnalysisRequest::new("class A {}");
        req.file_name = Some("A.java".into());
        assert!(build_prompt(&req).user.contains("from file `A.java`"));

        req.file_name = Some("  ".into());
        assert!(!build_prompt(&req).user.contains("from file"));
    }

    #[test]
    fn test_placeholders_in_code_left_alone() {
        let prompt = build_prompt(&AnalysisRequest::new("String s = \"{{CATEGORIES}}\";"));
        assert!(prompt.user.contains("\"{{CATEGORIES}}\""));
    }

    #[test]
    fn test_placeholders_in_file_name_left_alone() {
        let mut req = AnalysisRequest::new("class A {}");
        req.file_name = Some("{{CODE}}".into());
        let user = build_prompt(&req).user;
        assert!(user.starts_with("Analyze the following Java code from file `{{CODE}}`."));
        assert_eq!(user.matches("   1 | class A {}").count(), 1);

        req.file_name = Some("{{CATEGORIES}}{{LINE_COUNT}}.java".into());
        assert!(build_prompt(&req).user.contains("from file `{{CATEGORIES}}{{LINE_COUNT}}.java`"));
    }

    #[test]
    fn test_unknown_placeholder_kept() {
        let vars = PromptVariables { code: "x".into(), categories: vec!["bugs"], file_name: None };
        assert_eq!(interpolate("{{NOPE}} {{CATEGORIES}}", &vars), "{{NOPE}} bugs");
    }
}
