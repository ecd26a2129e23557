//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`PipelineEvent`]s. It
//! is designed to be shared via `Arc<EventBus>` across the application.

use serde::Serialize;
use tokio::sync::broadcast;

use pictura_core::item::GenerationStatus;
use pictura_core::types::ItemIndex;

/// A state transition of the generation pipeline.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PipelineEvent {
    /// A run published its pending item list and is about to generate.
    RunStarted { run_id: u64, total: usize },

    /// The run-wide shared style text was generated.
    StyleGenerated { run_id: u64 },

    /// One item reached a terminal state.
    ItemFinished {
        run_id: u64,
        index: ItemIndex,
        status: GenerationStatus,
    },

    /// Every item of the run reached a terminal state.
    RunCompleted { run_id: u64 },

    /// A project snapshot was written to the store.
    ProjectSaved { project_id: String },
}

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`PipelineEvent`].
pub struct EventBus {
    sender: broadcast::Sender<PipelineEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are
    /// dropped and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: PipelineEvent) {
        tracing::trace!(?event, "Publishing pipeline event");
        // Ignore the SendError; it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<PipelineEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
