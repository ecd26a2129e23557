//! The generation seam the pipeline is written against.
//!
//! Keeping the two operations behind a trait lets pipeline and API tests
//! run against a scripted in-memory backend instead of the network.

use crate::client::{GenAiClient, GenAiError};

/// A backend that can transform images and generate text.
#[async_trait::async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Transform `source_image` (a base64 data URI) according to the
    /// instruction; returns the result as an image data URI.
    async fn transform_image(
        &self,
        source_image: &str,
        instruction: &str,
    ) -> Result<String, GenAiError>;

    /// Generate free text from a prompt.
    async fn generate_text(&self, prompt: &str) -> Result<String, GenAiError>;
}

#[async_trait::async_trait]
impl GenerationBackend for GenAiClient {
    async fn transform_image(
        &self,
        source_image: &str,
        instruction: &str,
    ) -> Result<String, GenAiError> {
        GenAiClient::transform_image(self, source_image, instruction).await
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, GenAiError> {
        GenAiClient::generate_text(self, prompt).await
    }
}
