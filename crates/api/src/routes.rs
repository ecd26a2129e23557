//! Router and middleware assembly.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::handlers;
use crate::state::AppState;

/// Build the full application: routes plus the middleware stack (CORS,
/// request id, timeout, tracing, panic recovery).
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config);
    let timeout = Duration::from_secs(state.config.request_timeout_secs);
    let x_request_id = HeaderName::from_static("x-request-id");

    build_router(state)
        .layer(CatchPanicLayer::new())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::new(timeout))
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
        .layer(cors)
}

/// Routes only, without middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/api/v1", api_routes())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/themes", get(handlers::themes::list))
        .route("/session", get(handlers::session::get_session))
        .route(
            "/session/source-image",
            put(handlers::session::set_source_image),
        )
        .route("/session/theme", put(handlers::session::select_theme))
        .route("/session/options", put(handlers::session::update_options))
        .route(
            "/session/hair-styles/toggle",
            post(handlers::session::toggle_hair_style),
        )
        .route("/session/start-over", post(handlers::session::start_over))
        .route("/generate", post(handlers::generation::start_run))
        .route(
            "/items/{index}/regenerate",
            post(handlers::generation::regenerate),
        )
        .route("/downloads/shot", post(handlers::downloads::download_shot))
        .route(
            "/downloads/album",
            post(handlers::downloads::download_album),
        )
        .route(
            "/projects",
            get(handlers::projects::list).post(handlers::projects::save),
        )
        .route("/projects/{id}/load", post(handlers::projects::load))
        .route("/projects/{id}", delete(handlers::projects::delete))
}

fn build_cors_layer(config: &crate::config::ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}
