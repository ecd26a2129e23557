use std::sync::Arc;

use pictura_events::EventBus;
use pictura_pipeline::{Pipeline, SessionHandle};
use pictura_store::DbPool;

use crate::config::ServerConfig;
use crate::identity::Identity;

/// Shared application state available to all axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`). `pool` is `None` when no database is configured; the
/// studio then runs local-only and project routes report the
/// degradation.
#[derive(Clone)]
pub struct AppState {
    pub pool: Option<DbPool>,
    pub config: Arc<ServerConfig>,
    pub identity: Arc<Identity>,
    pub session: SessionHandle,
    pub pipeline: Arc<Pipeline>,
    pub event_bus: Arc<EventBus>,
}
