//! Theme catalog endpoint.

use axum::Json;
use serde::Serialize;

use pictura_core::theme::{shows_shot_labels, CatalogPrompt, THEMES};

/// One catalog entry as the frontend sees it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeView {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub prompts: &'static [CatalogPrompt],
    pub styles: &'static [&'static str],
    /// Whether exports stamp the per-shot label for this theme.
    pub shows_shot_labels: bool,
}

/// GET /api/v1/themes
pub async fn list() -> Json<Vec<ThemeView>> {
    Json(
        THEMES
            .iter()
            .map(|theme| ThemeView {
                key: theme.key,
                name: theme.name,
                description: theme.description,
                icon: theme.icon,
                prompts: theme.prompts,
                styles: theme.styles,
                shows_shot_labels: shows_shot_labels(theme.key),
            })
            .collect(),
    )
}
