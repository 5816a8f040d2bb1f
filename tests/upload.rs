use axum::{body::to_bytes, http::Request, http::StatusCode, Router};
use serde_json::Value;
use tower::ServiceExt;
use trackstat_rs::{config::Config, routes, state::AppState};

fn app() -> Router {
    routes::app(AppState::new(Config::default()))
}

fn sample_gpx() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk><name>Equator</name><trkseg>
    <trkpt lat="0" lon="0"><ele>1.0</ele></trkpt>
    <trkpt lat="0" lon="1"><ele>2.0</ele></trkpt>
  </trkseg></trk>
</gpx>"#
}

fn multipart_body(field: &str, file_name: &str, file_body: &str, boundary: &str) -> String {
    format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n{file_body}\r\n--{boundary}--\r\n"
    )
}

async fn post(uri: &str, body: String) -> (StatusCode, String) {
    let boundary = "X-BOUNDARY-TEST";
    let response = app()
        .oneshot(
            Request::builder()
                .uri(uri)
                .method("POST")
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(axum::body::Body::from(body))
                .expect("request"),
        )
        .await
        .expect("response");

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    (status, String::from_utf8(body.to_vec()).expect("utf8"))
}

#[tokio::test]
async fn upload_gpx_returns_statistics_json() {
    let body = multipart_body("gpxfile", "ride.gpx", sample_gpx(), "X-BOUNDARY-TEST");
    let (status, text) = post("/api/upload", body).await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&text).expect("json");
    assert_eq!(json["points"], 2);
    assert_eq!(json["bounds"]["max_lon"], 1.0);
    assert_eq!(json["trackpoints"].as_array().expect("trackpoints").len(), 2);
    let distance = json["distance_m"].as_f64().expect("distance");
    assert!((distance - 111_194.93).abs() < 1.0, "distance was {distance}");
}

#[tokio::test]
async fn upload_without_track_points_has_null_bounds() {
    let gpx = r#"<gpx xmlns="http://www.topografix.com/GPX/1/1"><trk/></gpx>"#;
    let body = multipart_body("gpxfile", "empty.gpx", gpx, "X-BOUNDARY-TEST");
    let (status, text) = post("/api/upload", body).await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&text).expect("json");
    assert_eq!(json["points"], 0);
    assert!(json["bounds"].is_null());
    assert_eq!(json["distance_m"], 0.0);
}

#[tokio::test]
async fn upload_rejects_malformed_gpx() {
    let body = multipart_body("gpxfile", "ride.gpx", "<gpx><trk", "X-BOUNDARY-TEST");
    let (status, text) = post("/api/upload", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(text.contains("\"error\""));
}

#[tokio::test]
async fn upload_rejects_missing_file_field() {
    let body = multipart_body("file", "ride.gpx", sample_gpx(), "X-BOUNDARY-TEST");
    let (status, text) = post("/api/upload", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(text.contains("No file part"));
}

#[tokio::test]
async fn upload_rejects_empty_file_selection() {
    let body = multipart_body("gpxfile", "", "", "X-BOUNDARY-TEST");
    let (status, text) = post("/api/upload", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(text.contains("No selected file"));
}

#[tokio::test]
async fn form_upload_renders_result_page() {
    let body = multipart_body("gpxfile", "ride.gpx", sample_gpx(), "X-BOUNDARY-TEST");
    let (status, text) = post("/upload", body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("<th>Points</th><td>2</td>"));
    assert!(text.contains("0.000000 to 1.000000"));
}

#[tokio::test]
async fn form_upload_renders_escaped_error_page() {
    let gpx = r#"<gpx xmlns="http://www.topografix.com/GPX/1/1"><trkpt lat="&lt;script&gt;" lon="0"/></gpx>"#;
    let body = multipart_body("gpxfile", "ride.gpx", gpx, "X-BOUNDARY-TEST");
    let (status, text) = post("/upload", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(text.contains("Upload failed"));
    assert!(text.contains("&lt;script&gt;"));
    assert!(!text.contains("<script>"));
}

#[tokio::test]
async fn index_serves_upload_form() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/")
                .method("GET")
                .body(axum::body::Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let text = String::from_utf8(body.to_vec()).expect("utf8");
    assert!(text.contains("name=\"gpxfile\""));
}
