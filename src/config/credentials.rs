use tracing::debug;

const PLACEHOLDER_KEYS: &[&str] = &[
    "your_api_key_here",
    "your-api-key",
    "your_deepseek_api_key",
    "changeme",
    "sk-xxx",
];
const MIN_KEY_LENGTH: usize = 10;

/// Resolve a credential value. If the value starts with '$', treat it as an
/// environment variable reference and resolve from the environment.
pub fn resolve_credential(value: &str) -> String {
    if let Some(var_name) = value.strip_prefix('$') {
        match std::env::var(var_name) {
            Ok(resolved) => {
                debug!(var = %var_name, "Resolved credential from environment");
                resolved
            }
            Err(_) => {
                debug!(var = %var_name, "Environment variable not set, using literal");
                value.to_string()
            }
        }
    } else {
        value.to_string()
    }
}

/// Whether a configured key could plausibly authenticate: non-empty, not a
/// template placeholder and not an unresolved `$VAR` reference.
pub fn is_usable_api_key(key: &str) -> bool {
    let key = key.trim();
    if key.len() < MIN_KEY_LENGTH || key.starts_with('$') {
        return false;
    }
    let lowered = key.to_ascii_lowercase();
    !PLACEHOLDER_KEYS.iter().any(|p| lowered == *p || (p.starts_with("sk-x") && lowered.starts_with(p)))
}

/// Redact sensitive values in a string. Replaces known credential patterns
/// with [REDACTED].
pub fn redact_credentials(text: &str, secrets: &[&str]) -> String {
    let mut result = text.to_string();
    for secret in secrets {
        if !secret.is_empty() && secret.len() >= 4 {
            result = result.replace(secret, "[REDACTED]");
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_credential_literal() {
        assert_eq!(resolve_credential("sk-literal-key"), "sk-literal-key");
    }

    #[test]
    fn test_resolve_credential_env_var() {
        std::env::set_var("TEST_DEEPCHECK_CRED", "sk-secret123456");
        assert_eq!(resolve_credential("$TEST_DEEPCHECK_CRED"), "sk-secret123456");
        std::env::remove_var("TEST_DEEPCHECK_CRED");
    }

    #[test]
    fn test_resolve_credential_missing_env_var() {
        assert_eq!(resolve_credential("$NONEXISTENT_DEEPCHECK_VAR"), "$NONEXISTENT_DEEPCHECK_VAR");
    }

    #[test]
    fn test_usable_api_key() {
        assert!(is_usable_api_key("sk-0123456789abcdef"));
        assert!(!is_usable_api_key(""));
        assert!(!is_usable_api_key("   "));
        assert!(!is_usable_api_key("short"));
        assert!(!is_usable_api_key("your_api_key_here"));
        assert!(!is_usable_api_key("sk-xxxxxxxxxxxxxxxx"));
        assert!(!is_usable_api_key("$DEEPSEEK_API_KEY"));
    }

    #[test]
    fn test_redact_credentials() {
        let text = "request failed for key sk-abcdef123456";
        let redacted = redact_credentials(text, &["sk-abcdef123456"]);
        assert_eq!(redacted, "request failed for key [REDACTED]");
    }

    #[test]
    fn test_redact_credentials_short_secret_ignored() {
        assert_eq!(redact_credentials("key=ab", &["ab"]), "key=ab");
    }
}
