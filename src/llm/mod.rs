pub mod provider;
pub mod deepseek;
pub mod types;
pub mod catalog;

pub use provider::LLMProvider;
pub use deepseek::DeepSeekProvider;
pub use types::{CompletionOptions, LLMResponse, Usage};
