//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response has the given Content-Type
pub fn assert_content_type(response: &TestResponse, expected: &str) {
    assert_eq!(
        response.header("content-type"),
        Some(expected),
        "Expected Content-Type: {expected}"
    );
}

/// Assert response is a valid PNG image
pub fn assert_png(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_png(),
        "Expected PNG image, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );
    assert_content_type(response, "image/png");
}

/// Assert response is a packed bitmap of the given panel size
pub fn assert_packed_bitmap(response: &TestResponse, width: u32, height: u32) {
    assert_ok(response);
    assert_content_type(response, "application/octet-stream");

    let expected = (width / 8 * height) as usize;
    assert_eq!(response.body.len(), expected, "Packed bitmap size");
    assert_eq!(
        response.header("content-length"),
        Some(expected.to_string().as_str()),
        "Content-Length should match the packed size"
    );
}

/// Assert JSON error response with expected status field
pub fn assert_json_error(response: &TestResponse, expected: StatusCode) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected.as_u16() as u64),
        "Full response: {}",
        serde_json::to_string_pretty(&json).unwrap()
    );
    assert!(json["error"].is_string(), "Expected error message");
}
