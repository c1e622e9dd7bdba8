/// Longest excerpt of raw model output echoed back in a parse-failure issue.
pub const MAX_EXCERPT_CHARS: usize = 500;
const MAX_ERROR_CHARS: usize = 300;

/// Keep at most `max_chars` characters, appending `...` when something was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

pub fn truncate_excerpt(text: &str) -> String {
    truncate_chars(text.trim(), MAX_EXCERPT_CHARS)
}

/// Shorten an upstream error body before it is logged or put in an error message.
pub fn truncate_error(error: &str) -> String {
    truncate_chars(error.trim(), MAX_ERROR_CHARS)
}
