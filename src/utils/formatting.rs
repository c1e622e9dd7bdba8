use std::time::Duration;

/// Human-readable elapsed time for CLI output.
pub fn format_elapsed(elapsed: Duration) -> String {
    let ms = elapsed.as_millis() as u64;
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000)
    }
}

/// Qualitative band for a 0-100 score.
pub fn score_label(score: u8) -> &'static str {
    match score {
        90..=u8::MAX => "excellent",
        75..=89 => "good",
        50..=74 => "fair",
        _ => "poor",
    }
}

/// Fixed-width bar such as `[#######---]` for a 0-100 score.
pub fn score_bar(score: u8, width: usize) -> String {
    let filled = (score.min(100) as usize * width + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
