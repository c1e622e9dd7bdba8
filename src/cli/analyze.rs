use std::fmt::Write as _;
use std::path::Path;
use std::time::{Duration, Instant};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use crate::analysis::{AnalysisMode, Analyzer};
use crate::cli::commands::AnalyzeArgs;
use crate::config;
use crate::errors::AnalyzerError;
use crate::models::{AnalysisRequest, AnalysisResult, CheckOptions, Severity};
use crate::utils::formatting::{format_elapsed, score_bar, score_label};

pub async fn handle_analyze(args: AnalyzeArgs) -> Result<(), AnalyzerError> {
    let config = config::load_config(args.config.as_deref().map(Path::new)).await?;
    let code = tokio::fs::read_to_string(&args.file).await?;

    let request = AnalysisRequest {
        code,
        options: CheckOptions {
            security: !args.no_security,
            performance: !args.no_performance,
            bugs: !args.no_bugs,
            style: !args.no_style,
        },
        file_name: Path::new(&args.file).file_name().map(|n| n.to_string_lossy().into_owned()),
    };

    let analyzer = Analyzer::from_config(&config);
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner:.cyan} {msg}")
            .unwrap()
    );
    spinner.set_message(format!("Analyzing {}...", args.file));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let started = Instant::now();
    let outcome = if args.demo {
        analyzer.analyze_demo(&request)
    } else {
        analyzer.analyze(&request).await
    };
    spinner.finish_and_clear();
    let outcome = outcome?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.result)?);
        return Ok(());
    }

    if outcome.mode == AnalysisMode::Demo {
        println!("{}", style("Demo mode: results are synthetic, no API call was made.").yellow());
    }
    print!("{}", render_report(&args.file, &outcome.result, started.elapsed()));
    if let Some(usage) = outcome.usage {
        println!(
            "{}",
            style(format!(
                "tokens: {} prompt + {} completion = {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            ))
            .dim()
        );
    }
    Ok(())
}

fn severity_tag(severity: Severity) -> String {
    let label = format!("{:<8}", severity.to_string().to_uppercase());
    match severity {
        Severity::Critical => style(label).red().bold().to_string(),
        Severity::High => style(label).red().to_string(),
        Severity::Medium => style(label).yellow().to_string(),
        Severity::Low => style(label).cyan().to_string(),
    }
}

/// Plain-text report of a result, most severe issues first.
pub fn render_report(file: &str, result: &AnalysisResult, elapsed: Duration) -> String {
    let mut out = String::new();
    let s = &result.summary;
    let m = &result.metrics;

    let _ = writeln!(out, "{} {} ({})", style("Report for").bold(), style(file).cyan(), format_elapsed(elapsed));
    let _ = writeln!(
        out,
        "  {} issues: {} critical, {} high, {} medium, {} low",
        s.total, s.critical, s.high, s.medium, s.low
    );
    let _ = writeln!(out, "  complexity {}  lines {}", m.complexity, m.lines_of_code);
    let _ = writeln!(
        out,
        "  maintainability {} {:>3} ({})",
        score_bar(m.maintainability, 20), m.maintainability, score_label(m.maintainability)
    );
    let _ = writeln!(
        out,
        "  security        {} {:>3} ({})",
        score_bar(m.security_score, 20), m.security_score, score_label(m.security_score)
    );

    if !result.issues.is_empty() {
        let _ = writeln!(out);
    }
    for issue in result.issues_by_severity() {
        let location = if issue.line > 0 { format!("line {}", issue.line) } else { "line ?".to_string() };
        let _ = writeln!(out, "  {} {} ({})", severity_tag(issue.severity), style(&issue.title).bold(), location);
        if !issue.description.is_empty() {
            let _ = writeln!(out, "           {}", issue.description);
        }
        if let Some(code) = &issue.code {
            let _ = writeln!(out, "           {}", style(code).dim());
        }
        if let Some(fix) = &issue.suggestion {
            let _ = writeln!(out, "           {} {}", style("fix:").green(), fix);
        }
    }

    if !result.suggestions.is_empty() {
        let _ = writeln!(out, "\n  {}", style("Suggestions").bold());
        for suggestion in &result.suggestions {
            let _ = writeln!(out, "  - {}", suggestion);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Issue, Metrics};

    #[test]
    fn test_render_report_orders_by_severity() {
        console::set_colors_enabled(false);
        let issue = |title: &str, severity, line| Issue {
            title: title.to_string(),
            severity,
            line,
            description: String::new(),
            category: None,
            code: None,
            suggestion: None,
        };
        let result = AnalysisResult::new(
            vec![issue("minor thing", Severity::Low, 3), issue("injection", Severity::Critical, 0)],
            vec!["Write tests".into()],
            Metrics { complexity: 4, lines_of_code: 10, maintainability: 78, security_score: 74 },
        );

        let report = render_report("A.java", &result, Duration::from_millis(20));
        assert!(report.contains("2 issues: 1 critical, 0 high, 0 medium, 1 low"));
        assert!(report.find("injection").unwrap() < report.find("minor thing").unwrap());
        assert!(report.contains("line ?"));
        assert!(report.contains("- Write tests"));
    }
}
