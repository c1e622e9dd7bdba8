pub mod credentials;
pub mod parser;
pub mod types;

pub use types::*;
pub use parser::{load_config, parse_config};
pub use credentials::{is_usable_api_key, resolve_credential};

impl LLMConfig {
    /// The configured API key with `$VAR` references resolved, if it is usable.
    pub fn usable_api_key(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .map(resolve_credential)
            .filter(|key| is_usable_api_key(key))
    }
}
