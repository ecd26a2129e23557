//! The generation pipeline: one session aggregate plus the run state
//! machine that drives sequential per-shot generation.

pub mod runner;
pub mod session;

pub use runner::{Pipeline, PipelineError, RunContext};
pub use session::{Session, SessionHandle};
