//! HTTP surface of the Pictura studio.
//!
//! Thin axum handlers over the session, pipeline, album, and store
//! crates; the presentation layer (a separate frontend) consumes this
//! API and renders the session state it returns.

pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod routes;
pub mod state;
