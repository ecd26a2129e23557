//! The session aggregate.
//!
//! All mutable studio state lives in one owned [`Session`] value behind a
//! single async mutex, with no ambient globals. Every item-list write goes
//! through this lock, which is what serializes a full run against
//! regenerate-at-index.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use pictura_core::error::CoreError;
use pictura_core::item::{progress, GenerationItem};
use pictura_core::options::ThemeOptions;
use pictura_core::project::ProjectSnapshot;
use pictura_core::theme::validate_theme_key;
use pictura_core::types::ImageData;

/// One user's in-memory studio state.
#[derive(Debug, Default)]
pub struct Session {
    pub source_image: Option<ImageData>,
    pub theme_key: Option<String>,
    pub options: ThemeOptions,
    /// Run-wide generated style text; empty unless the last run produced
    /// one.
    pub album_style: String,
    pub items: Vec<GenerationItem>,
    /// Monotonically increasing run tag. Every async continuation checks
    /// it before writing; a mismatch means the continuation belongs to a
    /// superseded run and its result is discarded.
    pub run_id: u64,
    /// Store id of the currently loaded project, once saved.
    pub project_id: Option<String>,
    pub project_name: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the source photo. Previous results are abandoned.
    pub fn set_source_image(&mut self, image: ImageData) {
        self.source_image = Some(image);
        self.items.clear();
        self.run_id += 1;
    }

    /// Select the active theme. Options reset to defaults whenever the
    /// theme actually changes; reselecting the current theme is a no-op.
    pub fn select_theme(&mut self, key: &str) -> Result<(), CoreError> {
        validate_theme_key(key)?;
        if self.theme_key.as_deref() == Some(key) {
            return Ok(());
        }
        self.theme_key = Some(key.to_string());
        self.options = ThemeOptions::default();
        Ok(())
    }

    /// Reset to a blank session. Any in-flight run is superseded.
    pub fn start_over(&mut self) {
        let run_id = self.run_id + 1;
        *self = Self {
            run_id,
            ..Self::default()
        };
    }

    /// Fraction of items in a terminal state, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        progress(&self.items)
    }

    /// Capture the session as a persistable snapshot.
    ///
    /// Requires a source photo; there is nothing worth saving before one
    /// is set.
    pub fn snapshot(&self, fallback_name: String) -> Result<ProjectSnapshot, CoreError> {
        let source_image = self.source_image.clone().ok_or_else(|| {
            CoreError::Validation("Upload a photo before saving a project.".to_string())
        })?;

        Ok(ProjectSnapshot {
            id: self.project_id.clone(),
            name: self.project_name.clone().unwrap_or(fallback_name),
            source_image,
            theme_key: self.theme_key.clone(),
            items: self.items.clone(),
            options: self.options.clone(),
            album_style: self.album_style.clone(),
            saved_at: None,
        })
    }

    /// Replace the session state wholesale from a loaded snapshot. Any
    /// in-flight run is superseded.
    pub fn restore(&mut self, snapshot: ProjectSnapshot) {
        self.run_id += 1;
        self.source_image = Some(snapshot.source_image);
        self.theme_key = snapshot.theme_key;
        self.options = snapshot.options;
        self.album_style = snapshot.album_style;
        self.items = snapshot.items;
        self.project_id = snapshot.id;
        self.project_name = Some(snapshot.name);
    }
}

/// Cheaply cloneable shared handle to the session.
#[derive(Clone, Default)]
pub struct SessionHandle {
    inner: Arc<Mutex<Session>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the session for reading or writing.
    pub async fn lock(&self) -> MutexGuard<'_, Session> {
        self.inner.lock().await
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
