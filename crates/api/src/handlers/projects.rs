//! Project persistence handlers.
//!
//! All persistence is best-effort: a store failure surfaces as an error
//! response but never rolls back or corrupts the in-memory session.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pictura_core::project::ProjectSnapshot;
use pictura_events::PipelineEvent;
use pictura_store::{CreateProject, DbPool, ProjectRepo, UpdateProject};

use crate::error::{AppError, AppResult};
use crate::handlers::session::SessionView;
use crate::state::AppState;

/// One row of the project list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListEntry {
    pub id: String,
    pub name: String,
    pub saved_at: DateTime<Utc>,
}

/// GET /api/v1/projects, most recently saved first.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ProjectListEntry>>> {
    let pool = require_pool(&state)?;
    let records = ProjectRepo::list_by_user(pool, &state.identity.user_id).await?;

    Ok(Json(
        records
            .into_iter()
            .map(|record| ProjectListEntry {
                id: record.id.to_string(),
                name: record.name,
                saved_at: record.saved_at,
            })
            .collect(),
    ))
}

#[derive(Debug, Deserialize, Default)]
pub struct SaveProject {
    /// Optional rename applied with this save.
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub project_id: String,
    pub name: String,
    pub saved_at: DateTime<Utc>,
}

/// POST /api/v1/projects
///
/// First save creates a project; later saves update it in place.
pub async fn save(
    State(state): State<AppState>,
    Json(body): Json<SaveProject>,
) -> AppResult<Json<SaveResponse>> {
    let pool = require_pool(&state)?.clone();

    let (snapshot, existing_id) = {
        let mut session = state.session.lock().await;
        if let Some(name) = body.name {
            session.project_name = Some(name);
        }
        let fallback = ProjectSnapshot::default_name(Utc::now());
        (session.snapshot(fallback)?, session.project_id.clone())
    };

    // Update in place when the loaded project still exists; otherwise
    // (first save, or the row was deleted underneath us) create anew.
    if let Some(id) = existing_id {
        let uuid = parse_project_id(&id)?;
        let input = UpdateProject::from_snapshot(&snapshot)
            .map_err(|e| AppError::InternalError(format!("snapshot encode failed: {e}")))?;
        if let Some(record) =
            ProjectRepo::update(&pool, &state.identity.user_id, uuid, &input).await?
        {
            return Ok(Json(saved(&state, record).await));
        }
    }

    let input = CreateProject::from_snapshot(&state.identity.user_id, &snapshot)
        .map_err(|e| AppError::InternalError(format!("snapshot encode failed: {e}")))?;
    let record = ProjectRepo::create(&pool, &input).await?;
    Ok(Json(saved(&state, record).await))
}

/// POST /api/v1/projects/{id}/load
///
/// Replaces the in-memory session wholesale with the stored snapshot.
pub async fn load(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<SessionView>> {
    let pool = require_pool(&state)?;
    let uuid = parse_project_id(&id)?;

    let record = ProjectRepo::find_by_id(pool, &state.identity.user_id, uuid)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("project {id}")))?;
    let snapshot = record
        .snapshot()
        .map_err(|e| AppError::InternalError(format!("stored snapshot is unreadable: {e}")))?;

    let mut session = state.session.lock().await;
    session.restore(snapshot);
    Ok(Json(SessionView::from_session(&session)))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let pool = require_pool(&state)?;
    let uuid = parse_project_id(&id)?;

    let deleted = ProjectRepo::delete(pool, &state.identity.user_id, uuid).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("project {id}")));
    }

    // Deleting the loaded project detaches the session from it; the next
    // save creates a fresh document.
    let mut session = state.session.lock().await;
    if session.project_id.as_deref() == Some(id.as_str()) {
        session.project_id = None;
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn saved(state: &AppState, record: pictura_store::ProjectRecord) -> SaveResponse {
    let project_id = record.id.to_string();
    {
        let mut session = state.session.lock().await;
        session.project_id = Some(project_id.clone());
        session.project_name = Some(record.name.clone());
    }
    state.event_bus.publish(PipelineEvent::ProjectSaved {
        project_id: project_id.clone(),
    });

    SaveResponse {
        project_id,
        name: record.name,
        saved_at: record.saved_at,
    }
}

fn require_pool(state: &AppState) -> AppResult<&DbPool> {
    state.pool.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable(
            "Persistence is not configured; projects are unavailable.".to_string(),
        )
    })
}

fn parse_project_id(id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::BadRequest(format!("'{id}' is not a project id")))
}
