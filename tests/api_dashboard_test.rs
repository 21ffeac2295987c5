//! Tests for the /dashboard.* endpoints.

mod common;

use axum::http::StatusCode;
use common::{fixtures, TestApp};
use inkdash::models::AppConfig;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_raw_is_packed_panel_bitmap() {
    let app = TestApp::new();

    let response = app.get("/dashboard.raw").await;

    common::assert_packed_bitmap(&response, fixtures::WIDTH, fixtures::HEIGHT);
    // The left half is dark and the right half mostly white, so both bit
    // values must be present
    assert!(response.bytes().iter().any(|&b| b != 0x00));
    assert!(response.bytes().iter().any(|&b| b != 0xFF));
}

#[tokio::test]
async fn test_png_is_mask_of_raw() {
    let app = TestApp::new();

    let raw = app.get("/dashboard.raw").await;
    let png = app.get("/dashboard.png").await;
    common::assert_png(&png);

    let mut decoder = png::Decoder::new(std::io::Cursor::new(png.bytes().to_vec()));
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder.read_info().unwrap();
    let mut pixels = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut pixels).unwrap();
    assert_eq!((info.width, info.height), (fixtures::WIDTH, fixtures::HEIGHT));

    // Both come from the same cached frame: every PNG pixel matches its bit
    let channels = info.color_type.samples();
    for (i, px) in pixels[..info.buffer_size()].chunks_exact(channels).enumerate() {
        let bit = raw.bytes()[i / 8] >> (7 - i % 8) & 1;
        assert_eq!(px[0] == 255, bit == 1, "pixel {i}");
    }
}

#[tokio::test]
async fn test_svg_lists_upcoming_events() {
    let app = TestApp::new();

    let response = app.get("/dashboard.svg").await;

    common::assert_ok(&response);
    common::assert_content_type(&response, "image/svg+xml");
    let svg = response.text();
    assert!(svg.contains("HOLIDAY"));
    assert!(svg.contains("BIRTHDAY"));
    assert!(!svg.contains("NEWS"), "past events must be hidden");
    assert!(svg.find("HOLIDAY") < svg.find("BIRTHDAY"), "soonest first");
}

#[tokio::test]
async fn test_single_day_label() {
    let app = TestApp::with_config(
        AppConfig::default(),
        &fixtures::events_json_hours(&[(2, "Dentist")]),
    );

    let svg = app.get("/dashboard.svg").await.text();
    assert!(svg.contains("DENTIST"));
    assert!(svg.contains("day until"));
    assert!(!svg.contains("days until"));
}

#[tokio::test]
async fn test_broken_events_render_error_screen() {
    let app = TestApp::with_config(AppConfig::default(), "{ not json");

    let svg = app.get("/dashboard.svg").await;
    common::assert_ok(&svg);
    assert!(svg.text().contains("Invalid events file"));

    // The panel still gets a full-size bitmap
    let raw = app.get("/dashboard.raw").await;
    common::assert_packed_bitmap(&raw, fixtures::WIDTH, fixtures::HEIGHT);
}

#[tokio::test]
async fn test_frames_are_cached() {
    let app = TestApp::new();

    let first = app.get("/dashboard.svg").await;
    // Changing the events does not show up until the cached frame expires
    app.write_asset("events.json", fixtures::events_json(&[(5, "Surprise")]).as_bytes());
    let second = app.get("/dashboard.svg").await;

    assert_eq!(first.text(), second.text());
    assert!(!second.text().contains("SURPRISE"));
}

#[tokio::test]
async fn test_cache_disabled() {
    let mut config = AppConfig::default();
    config.cache_seconds = 0;
    let app = TestApp::with_config(config, &fixtures::default_events());

    let _ = app.get("/dashboard.svg").await;
    app.write_asset("events.json", fixtures::events_json(&[(5, "Surprise")]).as_bytes());
    let second = app.get("/dashboard.svg").await;

    assert!(second.text().contains("SURPRISE"));
    assert!(app
        .frame_cache
        .get_fresh(chrono::Utc::now(), chrono::Duration::hours(1))
        .await
        .is_none());
}

#[tokio::test]
async fn test_split_column_thresholds_right_half() {
    let mut config = AppConfig::default();
    config.dither.split_column = Some(400);
    let app = TestApp::with_config(config, "[]");

    let response = app.get("/dashboard.raw").await;
    common::assert_packed_bitmap(&response, fixtures::WIDTH, fixtures::HEIGHT);

    // With no events the right half is plain white apart from the divider
    // and the clock in the top rows
    let row_bytes = (fixtures::WIDTH / 8) as usize;
    let bottom_row = &response.bytes()[row_bytes * (fixtures::HEIGHT as usize - 1)..];
    assert!(bottom_row[400 / 8 + 1..].iter().all(|&b| b == 0xFF));
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.get("/health").await;
    common::assert_ok(&response);
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new();
    let response = app.get("/dashboard.html").await;
    common::assert_json_error(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wrong_method() {
    let app = TestApp::new();
    let response = app.request_method("POST", "/dashboard.raw").await;
    common::assert_status(&response, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_connection_close_header() {
    let app = TestApp::new();
    let response = app.get("/health").await;
    assert_eq!(response.header("connection"), Some("close"));
}
