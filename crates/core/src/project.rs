//! Project snapshot: the serializable union of one session's state.
//!
//! Persisted as a single opaque document per save. Loading replaces the
//! in-memory session state wholesale.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::item::GenerationItem;
use crate::options::ThemeOptions;
use crate::types::{ImageData, Timestamp};

/// One saved project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProjectSnapshot {
    /// Store-assigned id; absent until the first save completes.
    pub id: Option<String>,
    pub name: String,
    pub source_image: ImageData,
    pub theme_key: Option<String>,
    pub items: Vec<GenerationItem>,
    pub options: ThemeOptions,
    /// Run-wide generated style text, when the last run produced one.
    pub album_style: String,
    /// Set by the store on save; `None` on a never-saved snapshot.
    pub saved_at: Option<Timestamp>,
}

impl ProjectSnapshot {
    /// Default name for a project saved on `date`.
    pub fn default_name(date: Timestamp) -> String {
        format!("My Project - {}", date.format("%-m/%-d/%Y"))
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
