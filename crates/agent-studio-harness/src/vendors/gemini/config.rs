use std::time::Duration;

use crate::errors::HarnessError;

/// Public Generative Language API endpoint.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the Gemini provider client.
#[derive(Clone, Debug)]
pub struct GeminiClientConfig {
    /// API key sent in the `x-goog-api-key` header.
    pub api_key: String,
    /// Base URL including the API version segment.
    ///
    /// Useful for proxies or local test servers.
    pub base_url: String,
    /// Default HTTP timeout for requests.
    pub timeout: Duration,
}

impl GeminiClientConfig {
    /// Creates a config with sensible defaults and a provided API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Builds a config from `API_KEY`, falling back to `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self, HarnessError> {
        let api_key = ["API_KEY", "GEMINI_API_KEY"]
            .into_iter()
            .filter_map(|key| std::env::var(key).ok())
            .find(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                HarnessError::Config(
                    "missing API_KEY (or GEMINI_API_KEY) for Gemini provider".into(),
                )
            })?;
        Ok(Self::new(api_key))
    }

    /// Overrides the API base URL (for proxies or test servers).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the default HTTP timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        let model = model.trim().trim_start_matches("models/");
        format!(
            "{}/models/{model}:{method}",
            self.base_url.trim_end_matches('/')
        )
    }

    pub(crate) fn generate_content_url(&self, model: &str) -> String {
        self.model_url(model, "generateContent")
    }

    pub(crate) fn predict_url(&self, model: &str) -> String {
        self.model_url(model, "predict")
    }
}
