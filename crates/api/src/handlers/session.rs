//! Session state and mutation handlers.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use pictura_core::item::GenerationItem;
use pictura_core::options::ThemeOptions;
use pictura_pipeline::Session;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// The session as the frontend sees it.
///
/// The source image itself is omitted from the general view (it can be
/// megabytes); `has_source_image` is enough for the UI to gate actions.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub has_source_image: bool,
    pub theme_key: Option<String>,
    pub options: ThemeOptions,
    pub items: Vec<GenerationItem>,
    pub progress: f64,
    pub album_style: String,
    pub project_id: Option<String>,
    pub project_name: Option<String>,
}

impl SessionView {
    pub fn from_session(session: &Session) -> Self {
        Self {
            has_source_image: session.source_image.is_some(),
            theme_key: session.theme_key.clone(),
            options: session.options.clone(),
            items: session.items.clone(),
            progress: session.progress(),
            album_style: session.album_style.clone(),
            project_id: session.project_id.clone(),
            project_name: session.project_name.clone(),
        }
    }
}

/// GET /api/v1/session
pub async fn get_session(State(state): State<AppState>) -> Json<SessionView> {
    let session = state.session.lock().await;
    Json(SessionView::from_session(&session))
}

#[derive(Debug, Deserialize)]
pub struct SetSourceImage {
    pub image: String,
}

/// PUT /api/v1/session/source-image
///
/// Replaces the source photo; existing results are abandoned.
pub async fn set_source_image(
    State(state): State<AppState>,
    Json(body): Json<SetSourceImage>,
) -> AppResult<Json<SessionView>> {
    if !body.image.starts_with("data:") || !body.image.contains(',') {
        return Err(AppError::BadRequest(
            "That image couldn't be processed. Please try another file.".to_string(),
        ));
    }

    let mut session = state.session.lock().await;
    session.set_source_image(body.image);
    Ok(Json(SessionView::from_session(&session)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectTheme {
    pub theme_key: String,
}

/// PUT /api/v1/session/theme
pub async fn select_theme(
    State(state): State<AppState>,
    Json(body): Json<SelectTheme>,
) -> AppResult<Json<SessionView>> {
    let mut session = state.session.lock().await;
    session.select_theme(&body.theme_key)?;
    Ok(Json(SessionView::from_session(&session)))
}

/// PUT /api/v1/session/options
///
/// Replaces the whole option bag; rejected when it violates the
/// selection caps.
pub async fn update_options(
    State(state): State<AppState>,
    Json(options): Json<ThemeOptions>,
) -> AppResult<Json<SessionView>> {
    options.validate_caps()?;

    let mut session = state.session.lock().await;
    session.options = options;
    Ok(Json(SessionView::from_session(&session)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleHairStyle {
    pub style_id: String,
}

/// POST /api/v1/session/hair-styles/toggle
///
/// Toggles one catalog hairstyle, or the custom slot when `styleId` is
/// `"Other"`. Exceeding the selection cap is rejected with the
/// user-facing maximum message and no state change.
pub async fn toggle_hair_style(
    State(state): State<AppState>,
    Json(body): Json<ToggleHairStyle>,
) -> AppResult<Json<SessionView>> {
    let mut session = state.session.lock().await;
    if body.style_id == "Other" {
        session.options.toggle_custom_hair()?;
    } else {
        session.options.toggle_hair_style(&body.style_id)?;
    }
    Ok(Json(SessionView::from_session(&session)))
}

/// POST /api/v1/session/start-over
pub async fn start_over(State(state): State<AppState>) -> Json<SessionView> {
    let mut session = state.session.lock().await;
    session.start_over();
    Json(SessionView::from_session(&session))
}
