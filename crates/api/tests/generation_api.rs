//! Integration tests for the generation flow: start run, poll, regenerate,
//! and the download endpoints.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, Method, StatusCode};
use axum::Router;
use common::{body_bytes, body_json, get, send_json, stub_app, StubBackend, test_image_data_uri};
use serde_json::{json, Value};

/// Upload a photo and select a theme.
async fn seed(app: &Router, theme_key: &str) {
    let response = send_json(
        app.clone(),
        Method::PUT,
        "/api/v1/session/source-image",
        &json!({ "image": test_image_data_uri() }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send_json(
        app.clone(),
        Method::PUT,
        "/api/v1/session/theme",
        &json!({ "themeKey": theme_key }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Poll the session until the run finishes (bounded wait).
async fn wait_for_completion(app: &Router) -> Value {
    for _ in 0..300 {
        let view = body_json(get(app.clone(), "/api/v1/session").await).await;
        if view["progress"].as_f64() == Some(1.0) {
            return view;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("run did not complete in time");
}

// ---------------------------------------------------------------------------
// Full run
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generate_publishes_pending_items_then_completes() {
    let (app, _) = stub_app();
    seed(&app, "decades").await;

    let response = send_json(app.clone(), Method::POST, "/api/v1/generate", &json!({})).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let run = body_json(response).await;

    let items = run["items"].as_array().unwrap();
    assert_eq!(items.len(), 6);
    assert!(items.iter().all(|item| item["status"] == "pending"));
    assert!(items.iter().all(|item| item["imageUrl"].is_null()));
    assert_eq!(items[0]["id"], "1950s");

    let done = wait_for_completion(&app).await;
    let items = done["items"].as_array().unwrap();
    assert!(items.iter().all(|item| item["status"] == "success"));
    assert!(items
        .iter()
        .all(|item| item["imageUrl"].as_str().unwrap().starts_with("data:image/png;base64,")));
}

#[tokio::test]
async fn failing_backend_marks_items_failed_without_aborting() {
    let (app, _) = common::build_test_app(Arc::new(StubBackend {
        fail_transforms: true,
    }));
    seed(&app, "decades").await;

    let response = send_json(app.clone(), Method::POST, "/api/v1/generate", &json!({})).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let done = wait_for_completion(&app).await;
    let items = done["items"].as_array().unwrap();
    assert_eq!(items.len(), 6);
    assert!(items.iter().all(|item| item["status"] == "failed"));
}

// ---------------------------------------------------------------------------
// Regenerate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn regenerate_returns_the_updated_item() {
    let (app, _) = stub_app();
    seed(&app, "decades").await;
    send_json(app.clone(), Method::POST, "/api/v1/generate", &json!({})).await;
    wait_for_completion(&app).await;

    let response = send_json(
        app.clone(),
        Method::POST,
        "/api/v1/items/2/regenerate",
        &json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let item = body_json(response).await;
    assert_eq!(item["status"], "success");
    assert_eq!(item["id"], "1970s");
}

#[tokio::test]
async fn regenerate_out_of_range_is_404() {
    let (app, _) = stub_app();
    seed(&app, "decades").await;

    let response = send_json(
        app,
        Method::POST,
        "/api/v1/items/99/regenerate",
        &json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Downloads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn shot_download_returns_a_png_attachment() {
    let (app, _) = stub_app();
    seed(&app, "decades").await;
    send_json(app.clone(), Method::POST, "/api/v1/generate", &json!({})).await;
    wait_for_completion(&app).await;

    let response = send_json(
        app.clone(),
        Method::POST,
        "/api/v1/downloads/shot",
        &json!({ "index": 0, "ratio": "1:1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("pictura-1950s-1x1.png"));

    let bytes = body_bytes(response).await;
    let framed = image::load_from_memory(&bytes).expect("response should be a valid PNG");
    // 64px source + 4% side padding each side.
    assert_eq!(framed.width(), 64 + 2 * 3);
}

#[tokio::test]
async fn album_download_stitches_every_successful_shot() {
    let (app, _) = stub_app();
    seed(&app, "decades").await;
    send_json(app.clone(), Method::POST, "/api/v1/generate", &json!({})).await;
    wait_for_completion(&app).await;

    let response = send_json(
        app.clone(),
        Method::POST,
        "/api/v1/downloads/album",
        &json!({ "ratio": "9:16" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("pictura-album-9x16.png"));

    let bytes = body_bytes(response).await;
    assert!(image::load_from_memory(&bytes).is_ok());
}

#[tokio::test]
async fn album_download_without_successes_is_rejected() {
    let (app, _) = stub_app();
    seed(&app, "decades").await;

    let response = send_json(
        app,
        Method::POST,
        "/api/v1/downloads/album",
        &json!({ "ratio": "1:1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("no successful images"));
}

#[tokio::test]
async fn unsupported_ratio_is_rejected() {
    let (app, _) = stub_app();
    seed(&app, "decades").await;
    send_json(app.clone(), Method::POST, "/api/v1/generate", &json!({})).await;
    wait_for_completion(&app).await;

    let response = send_json(
        app,
        Method::POST,
        "/api/v1/downloads/shot",
        &json!({ "index": 0, "ratio": "4:3" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
