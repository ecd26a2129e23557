//! HTTP client for the generation backend.
//!
//! Two operations: an image-to-image transform and a text-to-text style
//! generation, both wrapped in the crate's retry policy. No local
//! caching: identical inputs always re-invoke the backend.

use crate::config::GenAiConfig;
use crate::messages::{GenerateContentRequest, GenerateContentResponse};
use crate::retry::with_retry;

/// Errors from the generation client.
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Generation API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The source image is not in the expected encoded form.
    #[error("Invalid source image: {0}")]
    InvalidImage(String),

    /// The backend answered 2xx but the expected payload is missing.
    #[error("{0}")]
    EmptyResponse(&'static str),
}

/// Client for a single generation backend.
pub struct GenAiClient {
    client: reqwest::Client,
    config: GenAiConfig,
}

impl GenAiClient {
    /// Create a new client from configuration.
    pub fn new(config: GenAiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful
    /// for connection pooling).
    pub fn with_client(client: reqwest::Client, config: GenAiConfig) -> Self {
        Self { client, config }
    }

    /// Transform a source image according to a natural-language
    /// instruction. Returns the result as a PNG data URI.
    ///
    /// The source must itself be a base64 data URI; success requires an
    /// image payload in the response. Wrapped in the retry policy.
    pub async fn transform_image(
        &self,
        source_image: &str,
        instruction: &str,
    ) -> Result<String, GenAiError> {
        with_retry(&self.config.retry, "transform_image", || async move {
            let payload = strip_data_uri(source_image)?;
            let request =
                GenerateContentRequest::image_edit(payload.to_string(), "image/png", instruction);
            let response = self.generate(&self.config.image_model, &request).await?;

            match response.first_inline_image() {
                Some(inline) => Ok(format!("data:image/png;base64,{}", inline.data)),
                None => Err(GenAiError::EmptyResponse("API returned no image data.")),
            }
        })
        .await
    }

    /// Generate free text from a prompt. Success requires non-empty text
    /// in the response. Wrapped in the retry policy.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, GenAiError> {
        with_retry(&self.config.retry, "generate_text", || async move {
            let request = GenerateContentRequest::text(prompt);
            let response = self.generate(&self.config.text_model, &request).await?;

            match response.first_text() {
                Some(text) => Ok(text.to_string()),
                None => Err(GenAiError::EmptyResponse(
                    "API returned no text data for dynamic prompt.",
                )),
            }
        })
        .await
    }

    // ---- private helpers ----

    /// Send one `generateContent` request to the given model.
    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenAiError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_url, model
        );

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`GenAiError::Api`] with the
    /// status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, GenAiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GenAiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body.
    async fn parse_response(
        response: reqwest::Response,
    ) -> Result<GenerateContentResponse, GenAiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<GenerateContentResponse>().await?)
    }
}

/// Extract the base64 payload from a `data:` URI.
///
/// Everything after the first comma is the payload; a missing or empty
/// payload is rejected before any network call is made.
fn strip_data_uri(image: &str) -> Result<&str, GenAiError> {
    image
        .split_once(',')
        .map(|(_, payload)| payload)
        .filter(|payload| !payload.is_empty())
        .ok_or_else(|| GenAiError::InvalidImage("expected a base64 data URI".to_string()))
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
