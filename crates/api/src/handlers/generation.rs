//! Run and regeneration handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use pictura_core::item::GenerationItem;
use pictura_core::types::ItemIndex;

use crate::error::AppResult;
use crate::state::AppState;

/// Response of a successfully started run: the pending item list,
/// published before any generation call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResponse {
    pub run_id: u64,
    pub items: Vec<GenerationItem>,
}

/// POST /api/v1/generate
///
/// Validates, resolves prompts, publishes the pending items, then
/// drives the sequential generation in a background task. The response
/// returns immediately with the pending list; the frontend polls
/// `GET /session` for per-item progress.
pub async fn start_run(State(state): State<AppState>) -> AppResult<(StatusCode, Json<RunResponse>)> {
    let context = state.pipeline.prepare_run().await?;
    let run_id = context.run_id;
    let items = state.session.lock().await.items.clone();

    let pipeline = state.pipeline.clone();
    tokio::spawn(async move {
        pipeline.execute_run(context).await;
    });

    Ok((StatusCode::ACCEPTED, Json(RunResponse { run_id, items })))
}

/// POST /api/v1/items/{index}/regenerate
///
/// Replays one shot from its stored prompt. The returned item reflects
/// the outcome, success or failure; no other item is touched.
pub async fn regenerate(
    State(state): State<AppState>,
    Path(index): Path<ItemIndex>,
) -> AppResult<Json<GenerationItem>> {
    let item = state.pipeline.regenerate_at(index).await?;
    Ok(Json(item))
}
