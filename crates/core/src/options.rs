//! Per-theme customization knobs.
//!
//! One flat option bag covers every theme; each theme reads only its own
//! fields. The bag is owned by the session and reset to defaults whenever
//! the active theme changes. Selection caps are enforced at mutation time
//! so the bag can never hold an over-limit state.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::theme::{THEME_HAIR_STYLER, THEME_STYLE_LOOKBOOK};

/// Upper bound on concurrently selected hairstyles, including the custom
/// slot while it is active.
pub const MAX_HAIR_STYLES: usize = 6;

/// Upper bound on hair colors (base color plus one highlight).
pub const MAX_HAIR_COLORS: usize = 2;

/// Sentinel style name meaning "free-text style" in the lookbook theme.
pub const LOOKBOOK_STYLE_OTHER: &str = "Other";

const MAX_STYLES_MESSAGE: &str = "You can select a maximum of 6 styles.";

/// All customizable knobs, as one flat record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ThemeOptions {
    pub headshot_expression: String,
    pub headshot_pose: String,
    pub lookbook_style: String,
    pub custom_lookbook_style: String,
    pub hair_colors: Vec<String>,
    pub selected_hair_styles: Vec<String>,
    pub custom_hair_style: String,
    pub custom_hair_active: bool,
}

impl Default for ThemeOptions {
    fn default() -> Self {
        Self {
            headshot_expression: "Friendly Smile".to_string(),
            headshot_pose: "Forward".to_string(),
            lookbook_style: String::new(),
            custom_lookbook_style: String::new(),
            hair_colors: Vec::new(),
            selected_hair_styles: Vec::new(),
            custom_hair_style: String::new(),
            custom_hair_active: false,
        }
    }
}

impl ThemeOptions {
    /// Number of active hairstyle selections, counting the custom slot.
    pub fn selected_style_count(&self) -> usize {
        self.selected_hair_styles.len() + usize::from(self.custom_hair_active)
    }

    /// Toggle a catalog hairstyle on or off.
    ///
    /// Adding a sixth-plus-one selection is rejected with the user-facing
    /// maximum message and leaves the bag unchanged.
    pub fn toggle_hair_style(&mut self, style_id: &str) -> Result<(), CoreError> {
        if let Some(pos) = self.selected_hair_styles.iter().position(|s| s == style_id) {
            self.selected_hair_styles.remove(pos);
            return Ok(());
        }
        if self.selected_style_count() >= MAX_HAIR_STYLES {
            return Err(CoreError::Validation(MAX_STYLES_MESSAGE.to_string()));
        }
        self.selected_hair_styles.push(style_id.to_string());
        Ok(())
    }

    /// Toggle the custom ("Other...") hairstyle slot.
    ///
    /// Activating counts against the selection cap. Deactivating clears
    /// the custom text.
    pub fn toggle_custom_hair(&mut self) -> Result<(), CoreError> {
        if self.custom_hair_active {
            self.custom_hair_active = false;
            self.custom_hair_style.clear();
            return Ok(());
        }
        if self.selected_hair_styles.len() >= MAX_HAIR_STYLES {
            return Err(CoreError::Validation(MAX_STYLES_MESSAGE.to_string()));
        }
        self.custom_hair_active = true;
        Ok(())
    }

    /// Add a hair color (base color first, then one highlight).
    pub fn add_hair_color(&mut self, color: &str) -> Result<(), CoreError> {
        if self.hair_colors.len() >= MAX_HAIR_COLORS {
            return Err(CoreError::Validation(format!(
                "You can add at most {MAX_HAIR_COLORS} hair colors."
            )));
        }
        self.hair_colors.push(color.to_string());
        Ok(())
    }

    /// Remove the hair color at `index`. Out-of-range indexes are a no-op.
    pub fn remove_hair_color(&mut self, index: usize) {
        if index < self.hair_colors.len() {
            self.hair_colors.remove(index);
        }
    }

    /// Check that a deserialized bag respects the selection caps.
    ///
    /// Mutation methods can never produce an over-limit bag; this guards
    /// bags arriving whole from the outside (API body, loaded snapshot).
    pub fn validate_caps(&self) -> Result<(), CoreError> {
        if self.selected_style_count() > MAX_HAIR_STYLES {
            return Err(CoreError::Validation(MAX_STYLES_MESSAGE.to_string()));
        }
        if self.hair_colors.len() > MAX_HAIR_COLORS {
            return Err(CoreError::Validation(format!(
                "You can add at most {MAX_HAIR_COLORS} hair colors."
            )));
        }
        Ok(())
    }
}

/// Validate theme-specific option completeness before a run starts.
///
/// Each violated rule has its own user-facing message. Themes without
/// required options always pass.
pub fn validate_for_run(theme_key: &str, options: &ThemeOptions) -> Result<(), CoreError> {
    match theme_key {
        THEME_STYLE_LOOKBOOK => {
            let missing = options.lookbook_style.is_empty()
                || (options.lookbook_style == LOOKBOOK_STYLE_OTHER
                    && options.custom_lookbook_style.trim().is_empty());
            if missing {
                return Err(CoreError::Validation(
                    "Please choose or enter a fashion style for your lookbook!".to_string(),
                ));
            }
            Ok(())
        }
        THEME_HAIR_STYLER => {
            let custom_usable =
                options.custom_hair_active && !options.custom_hair_style.trim().is_empty();
            if options.selected_hair_styles.is_empty() && !custom_usable {
                return Err(CoreError::Validation(
                    "Please select at least one hairstyle to generate!".to_string(),
                ));
            }
            if options.custom_hair_active && options.custom_hair_style.trim().is_empty() {
                return Err(CoreError::Validation(
                    "Please enter your custom hairstyle or deselect 'Other...'".to_string(),
                ));
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    // -- selection caps --

    #[test]
    fn toggle_adds_and_removes() {
        let mut options = ThemeOptions::default();
        options.toggle_hair_style("Short").unwrap();
        options.toggle_hair_style("Long").unwrap();
        assert_eq!(options.selected_hair_styles, vec!["Short", "Long"]);

        options.toggle_hair_style("Short").unwrap();
        assert_eq!(options.selected_hair_styles, vec!["Long"]);
    }

    #[test]
    fn seventh_selection_rejected_without_state_change() {
        let mut options = ThemeOptions::default();
        for style in ["Short", "Medium", "Long", "Pixie Cut", "Bob Cut", "Ponytail"] {
            options.toggle_hair_style(style).unwrap();
        }
        let before = options.clone();

        let err = options.toggle_hair_style("Braids").unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("maximum of 6"));
        assert_eq!(options, before);
    }

    #[test]
    fn custom_slot_counts_against_cap() {
        let mut options = ThemeOptions::default();
        for style in ["Short", "Medium", "Long", "Pixie Cut", "Bob Cut"] {
            options.toggle_hair_style(style).unwrap();
        }
        options.toggle_custom_hair().unwrap();
        assert_eq!(options.selected_style_count(), 6);

        let err = options.toggle_hair_style("Braids").unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn activating_custom_at_cap_rejected() {
        let mut options = ThemeOptions::default();
        for style in ["Short", "Medium", "Long", "Pixie Cut", "Bob Cut", "Ponytail"] {
            options.toggle_hair_style(style).unwrap();
        }
        assert!(options.toggle_custom_hair().is_err());
        assert!(!options.custom_hair_active);
    }

    #[test]
    fn deactivating_custom_clears_text() {
        let mut options = ThemeOptions::default();
        options.toggle_custom_hair().unwrap();
        options.custom_hair_style = "A vibrant pink mohawk".to_string();

        options.toggle_custom_hair().unwrap();
        assert!(!options.custom_hair_active);
        assert!(options.custom_hair_style.is_empty());
    }

    #[test]
    fn hair_color_cap() {
        let mut options = ThemeOptions::default();
        options.add_hair_color("#4a2c20").unwrap();
        options.add_hair_color("#d4a017").unwrap();
        assert!(options.add_hair_color("#000000").is_err());
        assert_eq!(options.hair_colors.len(), 2);

        options.remove_hair_color(0);
        assert_eq!(options.hair_colors, vec!["#d4a017"]);
        // Out of range is a no-op.
        options.remove_hair_color(5);
        assert_eq!(options.hair_colors.len(), 1);
    }

    #[test]
    fn validate_caps_rejects_oversized_bag() {
        let mut options = ThemeOptions::default();
        options.selected_hair_styles = (0..7).map(|i| format!("s{i}")).collect();
        assert!(options.validate_caps().is_err());
    }

    // -- per-theme run validation --

    #[test]
    fn lookbook_requires_style() {
        let options = ThemeOptions::default();
        let err = validate_for_run(THEME_STYLE_LOOKBOOK, &options).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("fashion style"));
    }

    #[test]
    fn lookbook_other_requires_custom_text() {
        let mut options = ThemeOptions::default();
        options.lookbook_style = LOOKBOOK_STYLE_OTHER.to_string();
        options.custom_lookbook_style = "   ".to_string();
        assert!(validate_for_run(THEME_STYLE_LOOKBOOK, &options).is_err());

        options.custom_lookbook_style = "Cyberpunk".to_string();
        assert!(validate_for_run(THEME_STYLE_LOOKBOOK, &options).is_ok());
    }

    #[test]
    fn hair_styler_requires_a_selection() {
        let options = ThemeOptions::default();
        let err = validate_for_run(THEME_HAIR_STYLER, &options).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("at least one hairstyle"));
    }

    #[test]
    fn hair_styler_custom_only_is_enough() {
        let mut options = ThemeOptions::default();
        options.toggle_custom_hair().unwrap();
        options.custom_hair_style = "A vibrant pink mohawk".to_string();
        assert!(validate_for_run(THEME_HAIR_STYLER, &options).is_ok());
    }

    #[test]
    fn hair_styler_active_empty_custom_rejected() {
        let mut options = ThemeOptions::default();
        options.toggle_hair_style("Short").unwrap();
        options.toggle_custom_hair().unwrap();
        let err = validate_for_run(THEME_HAIR_STYLER, &options).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("deselect"));
    }

    #[test]
    fn themes_without_required_options_pass() {
        let options = ThemeOptions::default();
        assert!(validate_for_run(crate::theme::THEME_DECADES, &options).is_ok());
        assert!(validate_for_run(crate::theme::THEME_FIGURINES, &options).is_ok());
    }
}
