//! The run state machine.
//!
//! A run is prepared in the foreground (validation, optional shared
//! style generation, prompt resolution, pending item publication) and
//! then executed strictly sequentially, one backend call at a time. A
//! shot's failure marks only that shot; the run always continues to the
//! end. Regeneration replays a single shot from its stored prompt.

use std::sync::Arc;

use pictura_core::error::CoreError;
use pictura_core::instruction::build_instruction;
use pictura_core::item::GenerationItem;
use pictura_core::options::{validate_for_run, ThemeOptions};
use pictura_core::prompt::{resolve_prompts, ResolvedPrompt};
use pictura_core::theme::{validate_theme_key, THEME_EIGHTIES_MALL};
use pictura_core::types::ItemIndex;
use pictura_events::{EventBus, PipelineEvent};
use pictura_genai::GenerationBackend;

use crate::session::SessionHandle;

/// Seed prompt for the run-wide generated style of the '80s mall theme.
pub const ALBUM_STYLE_SEED: &str =
    "A specific, creative, and detailed style for an 80s mall portrait studio photoshoot.";

/// Errors surfaced by [`Pipeline`] operations.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A user-correctable precondition failed; nothing was mutated.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Run setup failed before any item was created.
    #[error("{0}")]
    Setup(String),

    /// A newer run replaced this one; the result was discarded.
    #[error("The run was superseded by a newer one.")]
    Superseded,
}

/// Everything a run needs, captured at start time.
///
/// The item list stays in 1:1 same-order correspondence with `prompts`
/// for the whole run; later option edits cannot leak into an in-flight
/// run because instructions are built from this snapshot only.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: u64,
    pub theme_key: String,
    pub source_image: String,
    pub options: ThemeOptions,
    pub album_style: String,
    pub prompts: Vec<ResolvedPrompt>,
}

/// The generation pipeline over one session.
pub struct Pipeline {
    session: SessionHandle,
    backend: Arc<dyn GenerationBackend>,
    bus: Arc<EventBus>,
}

impl Pipeline {
    pub fn new(session: SessionHandle, backend: Arc<dyn GenerationBackend>, bus: Arc<EventBus>) -> Self {
        Self {
            session,
            backend,
            bus,
        }
    }

    /// Validate preconditions, claim a new run id, generate the shared
    /// style when the theme requires one, resolve the prompt list, and
    /// publish the pending items.
    ///
    /// On any error no items exist for the new run. The pending item
    /// list is visible to readers as soon as this returns, before any
    /// image generation starts.
    pub async fn prepare_run(&self) -> Result<RunContext, PipelineError> {
        let (run_id, theme_key, source_image, options) = {
            let mut session = self.session.lock().await;

            let source_image = session.source_image.clone().ok_or_else(|| {
                CoreError::Validation("Please upload a photo to get started!".to_string())
            })?;
            let theme_key = session
                .theme_key
                .clone()
                .ok_or_else(|| CoreError::Validation("Please select a theme!".to_string()))?;
            validate_for_run(&theme_key, &session.options)?;

            // Claim a new run: anything still in flight is superseded.
            session.run_id += 1;
            session.items.clear();
            session.album_style.clear();

            (
                session.run_id,
                theme_key,
                source_image,
                session.options.clone(),
            )
        };

        tracing::info!(run_id, theme = %theme_key, "Preparing generation run");

        let mut album_style = String::new();
        if theme_key == THEME_EIGHTIES_MALL {
            match self.backend.generate_text(ALBUM_STYLE_SEED).await {
                Ok(style) => {
                    let mut session = self.session.lock().await;
                    if session.run_id != run_id {
                        return Err(PipelineError::Superseded);
                    }
                    session.album_style = style.clone();
                    album_style = style;
                    self.bus.publish(PipelineEvent::StyleGenerated { run_id });
                }
                Err(error) => {
                    tracing::error!(run_id, error = %error, "Album style generation failed");
                    return Err(PipelineError::Setup(
                        "We couldn't generate a photoshoot style. Please try again.".to_string(),
                    ));
                }
            }
        }

        let theme = validate_theme_key(&theme_key)?;
        let prompts = resolve_prompts(theme, &options);
        if prompts.is_empty() {
            return Err(CoreError::Validation(
                "There was an issue preparing the creative ideas. Please try again.".to_string(),
            )
            .into());
        }

        {
            let mut session = self.session.lock().await;
            if session.run_id != run_id {
                return Err(PipelineError::Superseded);
            }
            session.items = prompts.iter().map(GenerationItem::pending).collect();
        }
        self.bus.publish(PipelineEvent::RunStarted {
            run_id,
            total: prompts.len(),
        });

        Ok(RunContext {
            run_id,
            theme_key,
            source_image,
            options,
            album_style,
            prompts,
        })
    }

    /// Generate every shot of a prepared run, strictly in order.
    ///
    /// Each result is written back only if the run is still current; a
    /// superseded run stops silently without touching newer state. A
    /// failed shot is marked and the run moves on.
    pub async fn execute_run(&self, context: RunContext) {
        for (index, prompt) in context.prompts.iter().enumerate() {
            let instruction = build_instruction(
                &context.theme_key,
                prompt,
                &context.options,
                &context.album_style,
            );
            let result = self
                .backend
                .transform_image(&context.source_image, &instruction)
                .await;

            let mut session = self.session.lock().await;
            if session.run_id != context.run_id {
                tracing::debug!(
                    run_id = context.run_id,
                    current = session.run_id,
                    "Run superseded; discarding in-flight result",
                );
                return;
            }
            let Some(item) = session.items.get_mut(index) else {
                return;
            };
            match result {
                Ok(image_url) => item.mark_success(image_url),
                Err(error) => {
                    tracing::warn!(
                        run_id = context.run_id,
                        index,
                        shot = %prompt.id,
                        error = %error,
                        "Shot generation failed",
                    );
                    item.mark_failed();
                }
            }
            let status = item.status;
            drop(session);
            self.bus.publish(PipelineEvent::ItemFinished {
                run_id: context.run_id,
                index,
                status,
            });
        }

        let session = self.session.lock().await;
        if session.run_id == context.run_id {
            tracing::info!(run_id = context.run_id, "Generation run completed");
            drop(session);
            self.bus.publish(PipelineEvent::RunCompleted {
                run_id: context.run_id,
            });
        }
    }

    /// Prepare and execute one run in the foreground.
    pub async fn run(&self) -> Result<(), PipelineError> {
        let context = self.prepare_run().await?;
        self.execute_run(context).await;
        Ok(())
    }

    /// Regenerate a single item from the prompt it was created from.
    ///
    /// The item goes back to pending, one transform is issued (only the
    /// client-level retry applies), and that item alone is updated. The
    /// returned item reflects the outcome, success or failure.
    pub async fn regenerate_at(&self, index: ItemIndex) -> Result<GenerationItem, PipelineError> {
        let (run_id, theme_key, source_image, options, album_style, prompt) = {
            let mut session = self.session.lock().await;

            let source_image = session.source_image.clone().ok_or_else(|| {
                CoreError::Validation("Please upload a photo to get started!".to_string())
            })?;
            let theme_key = session
                .theme_key
                .clone()
                .ok_or_else(|| CoreError::Validation("Please select a theme!".to_string()))?;
            let item = session
                .items
                .get_mut(index)
                .ok_or(CoreError::NotFound {
                    entity: "generation item",
                    index,
                })?;
            let prompt = item.prompt();
            item.mark_pending();

            (
                session.run_id,
                theme_key,
                source_image,
                session.options.clone(),
                session.album_style.clone(),
                prompt,
            )
        };

        tracing::info!(run_id, index, shot = %prompt.id, "Regenerating shot");
        let instruction = build_instruction(&theme_key, &prompt, &options, &album_style);
        let result = self
            .backend
            .transform_image(&source_image, &instruction)
            .await;

        let mut session = self.session.lock().await;
        if session.run_id != run_id {
            return Err(PipelineError::Superseded);
        }
        let item = session.items.get_mut(index).ok_or(CoreError::NotFound {
            entity: "generation item",
            index,
        })?;
        match result {
            Ok(image_url) => item.mark_success(image_url),
            Err(error) => {
                tracing::warn!(run_id, index, shot = %prompt.id, error = %error, "Regeneration failed");
                item.mark_failed();
            }
        }
        let updated = item.clone();
        let status = updated.status;
        drop(session);
        self.bus.publish(PipelineEvent::ItemFinished {
            run_id,
            index,
            status,
        });

        Ok(updated)
    }

    /// Current run progress in `[0, 1]`.
    pub async fn progress(&self) -> f64 {
        self.session.lock().await.progress()
    }
}
