//! Typed wire messages for the `generateContent` HTTP API.

use serde::{Deserialize, Serialize};

/// Request body for a `generateContent` call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Content,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// Ordered parts making up one request or response message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One message part: inline binary data and/or text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Base64 payload plus its MIME type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub data: String,
    pub mime_type: String,
}

/// Generation tuning; only the response modalities are used here.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
}

/// Response body of a `generateContent` call.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One response candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentRequest {
    /// An image-edit request: the source image plus the instruction,
    /// asking for image output.
    pub fn image_edit(image_base64: String, mime_type: &str, instruction: &str) -> Self {
        Self {
            contents: Content {
                parts: vec![
                    Part {
                        inline_data: Some(InlineData {
                            data: image_base64,
                            mime_type: mime_type.to_string(),
                        }),
                        text: None,
                    },
                    Part {
                        inline_data: None,
                        text: Some(instruction.to_string()),
                    },
                ],
            },
            generation_config: Some(GenerationConfig {
                response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
            }),
        }
    }

    /// A plain text-to-text request.
    pub fn text(prompt: &str) -> Self {
        Self {
            contents: Content {
                parts: vec![Part {
                    inline_data: None,
                    text: Some(prompt.to_string()),
                }],
            },
            generation_config: None,
        }
    }
}

impl GenerateContentResponse {
    /// The first inline image part of the first candidate, if any.
    pub fn first_inline_image(&self) -> Option<&InlineData> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|part| part.inline_data.as_ref())
    }

    /// The first non-empty text part of the first candidate, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|part| part.text.as_deref())
            .filter(|text| !text.is_empty())
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
