//! Integration tests for session state and option mutation routes.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, get, send_json, stub_app, test_image_data_uri};
use serde_json::json;

// ---------------------------------------------------------------------------
// Theme catalog
// ---------------------------------------------------------------------------

#[tokio::test]
async fn theme_catalog_lists_all_themes() {
    let (app, _) = stub_app();
    let response = get(app, "/api/v1/themes").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let themes = json.as_array().unwrap();
    assert_eq!(themes.len(), 7);

    let keys: Vec<&str> = themes.iter().map(|t| t["key"].as_str().unwrap()).collect();
    assert!(keys.contains(&"decades"));
    assert!(keys.contains(&"hair-styler"));

    let decades = themes.iter().find(|t| t["key"] == "decades").unwrap();
    assert_eq!(decades["showsShotLabels"], true);
    assert!(!decades["prompts"].as_array().unwrap().is_empty());

    let headshots = themes.iter().find(|t| t["key"] == "headshots").unwrap();
    assert_eq!(headshots["showsShotLabels"], false);
}

// ---------------------------------------------------------------------------
// Source image
// ---------------------------------------------------------------------------

#[tokio::test]
async fn uploading_a_source_image_updates_the_view() {
    let (app, _) = stub_app();

    let fresh = body_json(get(app.clone(), "/api/v1/session").await).await;
    assert_eq!(fresh["hasSourceImage"], false);

    let response = send_json(
        app.clone(),
        Method::PUT,
        "/api/v1/session/source-image",
        &json!({ "image": test_image_data_uri() }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let view = body_json(response).await;
    assert_eq!(view["hasSourceImage"], true);
    assert_eq!(view["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn non_data_uri_uploads_are_rejected() {
    let (app, _) = stub_app();
    let response = send_json(
        app,
        Method::PUT,
        "/api/v1/session/source-image",
        &json!({ "image": "just some text" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("couldn't be processed"));
}

// ---------------------------------------------------------------------------
// Theme selection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn selecting_an_unknown_theme_is_rejected() {
    let (app, _) = stub_app();
    let response = send_json(
        app,
        Method::PUT,
        "/api/v1/session/theme",
        &json!({ "themeKey": "polaroid" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("Unknown theme"));
}

#[tokio::test]
async fn changing_theme_resets_options() {
    let (app, _) = stub_app();

    send_json(
        app.clone(),
        Method::PUT,
        "/api/v1/session/theme",
        &json!({ "themeKey": "hair-styler" }),
    )
    .await;
    send_json(
        app.clone(),
        Method::POST,
        "/api/v1/session/hair-styles/toggle",
        &json!({ "styleId": "Short" }),
    )
    .await;

    let response = send_json(
        app.clone(),
        Method::PUT,
        "/api/v1/session/theme",
        &json!({ "themeKey": "decades" }),
    )
    .await;
    let view = body_json(response).await;
    assert_eq!(view["themeKey"], "decades");
    assert_eq!(view["options"]["selectedHairStyles"].as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// Hairstyle selection cap
// ---------------------------------------------------------------------------

#[tokio::test]
async fn seventh_hair_style_is_rejected_with_the_maximum_message() {
    let (app, _) = stub_app();
    send_json(
        app.clone(),
        Method::PUT,
        "/api/v1/session/theme",
        &json!({ "themeKey": "hair-styler" }),
    )
    .await;

    for style in ["Short", "Medium", "Long", "Pixie Cut", "Bob Cut", "Ponytail"] {
        let response = send_json(
            app.clone(),
            Method::POST,
            "/api/v1/session/hair-styles/toggle",
            &json!({ "styleId": style }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = send_json(
        app.clone(),
        Method::POST,
        "/api/v1/session/hair-styles/toggle",
        &json!({ "styleId": "Braids" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("maximum of 6"));

    // No state change: still six selected.
    let view = body_json(get(app, "/api/v1/session").await).await;
    assert_eq!(view["options"]["selectedHairStyles"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn replacing_the_option_bag_respects_caps() {
    let (app, _) = stub_app();
    let oversized: Vec<String> = (0..7).map(|i| format!("style-{i}")).collect();

    let response = send_json(
        app,
        Method::PUT,
        "/api/v1/session/options",
        &json!({
            "headshotExpression": "Friendly Smile",
            "headshotPose": "Forward",
            "lookbookStyle": "",
            "customLookbookStyle": "",
            "hairColors": [],
            "selectedHairStyles": oversized,
            "customHairStyle": "",
            "customHairActive": false,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Run preconditions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generating_without_a_photo_is_rejected() {
    let (app, _) = stub_app();
    let response = send_json(app, Method::POST, "/api/v1/generate", &json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Please upload a photo to get started!");
}

#[tokio::test]
async fn lookbook_without_a_style_is_rejected_with_zero_items() {
    let (app, _) = stub_app();
    send_json(
        app.clone(),
        Method::PUT,
        "/api/v1/session/source-image",
        &json!({ "image": test_image_data_uri() }),
    )
    .await;
    send_json(
        app.clone(),
        Method::PUT,
        "/api/v1/session/theme",
        &json!({ "themeKey": "style-lookbook" }),
    )
    .await;

    let response = send_json(app.clone(), Method::POST, "/api/v1/generate", &json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("fashion style"));

    let view = body_json(get(app, "/api/v1/session").await).await;
    assert_eq!(view["items"].as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// Start over
// ---------------------------------------------------------------------------

#[tokio::test]
async fn start_over_clears_the_session() {
    let (app, _) = stub_app();
    send_json(
        app.clone(),
        Method::PUT,
        "/api/v1/session/source-image",
        &json!({ "image": test_image_data_uri() }),
    )
    .await;
    send_json(
        app.clone(),
        Method::PUT,
        "/api/v1/session/theme",
        &json!({ "themeKey": "decades" }),
    )
    .await;

    let response = send_json(app.clone(), Method::POST, "/api/v1/session/start-over", &json!({})).await;
    let view = body_json(response).await;
    assert_eq!(view["hasSourceImage"], false);
    assert_eq!(view["themeKey"], serde_json::Value::Null);
    assert_eq!(view["progress"], 0.0);
}
