//! In-process pipeline progress events.
//!
//! The pipeline publishes a typed event per state transition; any number
//! of subscribers (progress endpoints, logging, tests) can observe them
//! independently.

pub mod bus;

pub use bus::{EventBus, PipelineEvent};
