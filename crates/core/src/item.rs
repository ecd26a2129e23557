//! Generation item state.
//!
//! One item per resolved prompt, created in bulk when a run starts and
//! mutated in place by index as calls resolve. The item carries its
//! originating prompt so regenerate-at-index can rebuild the exact
//! instruction even after the user has edited the option bag.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::prompt::{PromptSource, ResolvedPrompt};

/// Lifecycle state of one shot.
///
/// Transitions: `Pending -> Success | Failed`, and `Failed -> Pending`
/// again via explicit regeneration. There is no cancelled state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum GenerationStatus {
    Pending,
    Success,
    Failed,
}

/// One requested image variant within a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GenerationItem {
    /// Shot label, taken from the originating prompt id.
    pub id: String,
    /// The exact prompt text this item was created from.
    pub prompt_text: String,
    pub prompt_source: PromptSource,
    pub status: GenerationStatus,
    /// Result image as a data URI; present only after success.
    pub image_url: Option<String>,
}

impl GenerationItem {
    /// A fresh pending item for one resolved prompt.
    pub fn pending(prompt: &ResolvedPrompt) -> Self {
        Self {
            id: prompt.id.clone(),
            prompt_text: prompt.text.clone(),
            prompt_source: prompt.source,
            status: GenerationStatus::Pending,
            image_url: None,
        }
    }

    /// The resolved prompt this item was created from.
    pub fn prompt(&self) -> ResolvedPrompt {
        ResolvedPrompt {
            id: self.id.clone(),
            text: self.prompt_text.clone(),
            source: self.prompt_source,
        }
    }

    /// Mark this item successfully generated.
    pub fn mark_success(&mut self, image_url: String) {
        self.status = GenerationStatus::Success;
        self.image_url = Some(image_url);
    }

    /// Mark this item failed. Any previous image is discarded.
    pub fn mark_failed(&mut self) {
        self.status = GenerationStatus::Failed;
        self.image_url = None;
    }

    /// Reset to pending for regeneration.
    pub fn mark_pending(&mut self) {
        self.status = GenerationStatus::Pending;
    }
}

/// Fraction of items that have reached a terminal state, in `[0, 1]`.
///
/// An empty list reports `0.0`.
pub fn progress(items: &[GenerationItem]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    let finished = items
        .iter()
        .filter(|item| item.status != GenerationStatus::Pending)
        .count();
    finished as f64 / items.len() as f64
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_item(id: &str) -> GenerationItem {
        GenerationItem::pending(&ResolvedPrompt {
            id: id.to_string(),
            text: format!("{id} prompt"),
            source: PromptSource::Catalog,
        })
    }

    #[test]
    fn pending_item_has_no_image() {
        let item = pending_item("1950s");
        assert_eq!(item.status, GenerationStatus::Pending);
        assert!(item.image_url.is_none());
        assert_eq!(item.prompt().text, "1950s prompt");
    }

    #[test]
    fn success_and_failure_transitions() {
        let mut item = pending_item("1950s");
        item.mark_success("data:image/png;base64,AAAA".to_string());
        assert_eq!(item.status, GenerationStatus::Success);
        assert!(item.image_url.is_some());

        item.mark_pending();
        item.mark_failed();
        assert_eq!(item.status, GenerationStatus::Failed);
        assert!(item.image_url.is_none());
    }

    #[test]
    fn progress_empty_list_is_zero() {
        assert_eq!(progress(&[]), 0.0);
    }

    #[test]
    fn progress_counts_terminal_items() {
        let mut items = vec![pending_item("a"), pending_item("b"), pending_item("c"), pending_item("d")];
        assert_eq!(progress(&items), 0.0);

        items[0].mark_success("data:image/png;base64,AA".to_string());
        assert_eq!(progress(&items), 0.25);

        items[1].mark_failed();
        assert_eq!(progress(&items), 0.5);

        items[2].mark_success("data:image/png;base64,AA".to_string());
        items[3].mark_failed();
        assert_eq!(progress(&items), 1.0);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&GenerationStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
    }
}
