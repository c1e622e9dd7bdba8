pub struct ModelInfo {
    pub id: &'static str,
    pub recommended: bool,
}

pub const PROVIDER_ID: &str = "deepseek";
pub const API_KEY_ENV: &str = "DEEPSEEK_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";

pub static MODELS: &[ModelInfo] = &[
    ModelInfo { id: "deepseek-chat", recommended: true },
    ModelInfo { id: "deepseek-coder", recommended: false },
    ModelInfo { id: "deepseek-reasoner", recommended: false },
];

pub fn get_model(id: &str) -> Option<&'static ModelInfo> {
    MODELS.iter().find(|m| m.id == id)
}

pub fn default_model() -> &'static str {
    MODELS.iter()
        .find(|m| m.recommended)
        .map(|m| m.id)
        .unwrap_or("deepseek-chat")
}
