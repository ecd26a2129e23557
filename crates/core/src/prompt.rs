//! Prompt resolution: from a theme's static catalog plus the user's
//! options to the ordered prompt list a run will actually generate.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::options::ThemeOptions;
use crate::theme::{CatalogPrompt, Theme, THEME_HAIR_STYLER};

/// Where a resolved prompt came from.
///
/// A custom prompt is synthesized at run time from user free text; its id
/// is that text. Tagging the origin keeps regenerate-at-index logic free
/// of string-equality special cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum PromptSource {
    Catalog,
    Custom,
}

/// One prompt of a run's resolved list. `id` is also the shot's display
/// label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ResolvedPrompt {
    pub id: String,
    pub text: String,
    pub source: PromptSource,
}

impl ResolvedPrompt {
    /// A prompt taken verbatim from the catalog.
    pub fn from_catalog(prompt: &CatalogPrompt) -> Self {
        Self {
            id: prompt.id.to_string(),
            text: prompt.base.to_string(),
            source: PromptSource::Catalog,
        }
    }

    /// A prompt synthesized from user free text. The text doubles as the
    /// shot label.
    pub fn custom(text: &str) -> Self {
        Self {
            id: text.to_string(),
            text: text.to_string(),
            source: PromptSource::Custom,
        }
    }
}

/// Resolve the ordered prompt list for one run.
///
/// Every theme uses its full catalog except the hair styler, whose list
/// is the catalog filtered to the user's selection (catalog order, not
/// click order) plus at most one synthesized custom prompt appended at
/// the end.
pub fn resolve_prompts(theme: &Theme, options: &ThemeOptions) -> Vec<ResolvedPrompt> {
    if theme.key != THEME_HAIR_STYLER {
        return theme.prompts.iter().map(ResolvedPrompt::from_catalog).collect();
    }

    let mut prompts: Vec<ResolvedPrompt> = theme
        .prompts
        .iter()
        .filter(|p| options.selected_hair_styles.iter().any(|s| s == p.id))
        .map(ResolvedPrompt::from_catalog)
        .collect();

    let custom = options.custom_hair_style.trim();
    if options.custom_hair_active && !custom.is_empty() {
        prompts.push(ResolvedPrompt::custom(custom));
    }

    prompts
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
