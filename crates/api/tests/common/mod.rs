//! Shared helpers for API integration tests.
//!
//! Builds the full application (routes plus middleware) against an
//! in-memory generation backend and no database, so tests exercise the
//! same stack production uses without any external service.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use image::{Rgba, RgbaImage};
use serde_json::Value;
use tower::ServiceExt;

use pictura_api::config::ServerConfig;
use pictura_api::identity::Identity;
use pictura_api::routes;
use pictura_api::state::AppState;
use pictura_events::EventBus;
use pictura_genai::{GenAiError, GenerationBackend};
use pictura_pipeline::{Pipeline, SessionHandle};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// A real decodable PNG payload for stub results and source uploads.
pub fn test_image_data_uri() -> String {
    let image = RgbaImage::from_pixel(64, 64, Rgba([120, 40, 200, 255]));
    pictura_album::codec::encode_png_data_uri(&image).expect("encode test image")
}

/// Instant in-memory generation backend.
#[derive(Default)]
pub struct StubBackend {
    /// When set, every transform fails.
    pub fail_transforms: bool,
}

#[async_trait::async_trait]
impl GenerationBackend for StubBackend {
    async fn transform_image(
        &self,
        _source_image: &str,
        _instruction: &str,
    ) -> Result<String, GenAiError> {
        if self.fail_transforms {
            Err(GenAiError::Api {
                status: 503,
                body: "stubbed failure".to_string(),
            })
        } else {
            Ok(test_image_data_uri())
        }
    }

    async fn generate_text(&self, _prompt: &str) -> Result<String, GenAiError> {
        Ok("A chrome-and-neon dreamscape".to_string())
    }
}

/// Build the full application with all middleware layers, plus the
/// state backing it (for direct session inspection).
pub fn build_test_app(backend: Arc<dyn GenerationBackend>) -> (Router, AppState) {
    let session = SessionHandle::new();
    let event_bus = Arc::new(EventBus::default());
    let pipeline = Arc::new(Pipeline::new(session.clone(), backend, event_bus.clone()));

    let state = AppState {
        pool: None,
        config: Arc::new(test_config()),
        identity: Arc::new(Identity {
            user_id: "test-user".to_string(),
        }),
        session,
        pipeline,
        event_bus,
    };

    (routes::build_app(state.clone()), state)
}

/// Shorthand: app with the default stub backend.
pub fn stub_app() -> (Router, AppState) {
    build_test_app(Arc::new(StubBackend::default()))
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    )
    .await
    .expect("response")
}

pub async fn send_json(app: Router, method: Method, uri: &str, body: &Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(body).expect("encode body")))
            .expect("request"),
    )
    .await
    .expect("response")
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes()
        .to_vec()
}
