//! Domain model for the Pictura photo-theming studio.
//!
//! Holds everything that is pure and session-independent: the static
//! theme catalog, the per-theme option bag and its validation rules,
//! prompt resolution, the model-instruction builder, generation item
//! state, and the project snapshot document.

pub mod error;
pub mod instruction;
pub mod item;
pub mod options;
pub mod project;
pub mod prompt;
pub mod theme;
pub mod types;
