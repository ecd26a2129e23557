//! Generation backend configuration.

use crate::retry::RetryPolicy;

/// Connection settings for the generation backend, loaded from the
/// environment.
#[derive(Debug, Clone)]
pub struct GenAiConfig {
    /// Base HTTP URL of the generation API.
    pub api_url: String,
    /// API key sent with every request.
    pub api_key: String,
    /// Model used for image-to-image transforms.
    pub image_model: String,
    /// Model used for text-to-text style generation.
    pub text_model: String,
    /// Retry policy applied to both operations.
    pub retry: RetryPolicy,
}

impl GenAiConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var             | Default                                       |
    /// |---------------------|-----------------------------------------------|
    /// | `GENAI_API_URL`     | `https://generativelanguage.googleapis.com`   |
    /// | `GENAI_API_KEY`     | *(empty, with a warning)*                     |
    /// | `GENAI_IMAGE_MODEL` | `gemini-2.5-flash-image-preview`              |
    /// | `GENAI_TEXT_MODEL`  | `gemini-2.5-flash`                            |
    pub fn from_env() -> Self {
        let api_url = std::env::var("GENAI_API_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".into());

        let api_key = std::env::var("GENAI_API_KEY").unwrap_or_else(|_| {
            tracing::warn!("GENAI_API_KEY not set; generation requests will be rejected upstream");
            String::new()
        });

        let image_model = std::env::var("GENAI_IMAGE_MODEL")
            .unwrap_or_else(|_| "gemini-2.5-flash-image-preview".into());

        let text_model =
            std::env::var("GENAI_TEXT_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".into());

        Self {
            api_url,
            api_key,
            image_model,
            text_model,
            retry: RetryPolicy::default(),
        }
    }
}
