use axum::extract::Multipart;
use axum::response::{Html, IntoResponse, Response};
use axum::{routing::get, routing::post, Router};
use quick_xml::escape::escape;

use crate::error::AppError;
use crate::routes::upload::{analyze, read_upload, FILE_FIELD};
use crate::state::AppState;
use crate::types::track::TrackStatistics;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload))
}

async fn index() -> Html<String> {
    Html(layout(
        "Track statistics",
        &format!(
            r#"<form action="/upload" method="post" enctype="multipart/form-data">
<input type="file" name="{FILE_FIELD}" accept=".gpx">
<button type="submit">Analyze</button>
</form>"#
        ),
    ))
}

async fn upload(multipart: Multipart) -> Response {
    let result = match read_upload(multipart).await {
        Ok(upload) => analyze(&upload),
        Err(e) => Err(e),
    };

    match result {
        Ok(stats) => Html(layout("Track statistics", &render_stats(&stats))).into_response(),
        Err(e) => render_error(e),
    }
}

fn render_error(error: AppError) -> Response {
    let body = format!(
        r#"<p class="error">{}</p>
<p><a href="/">Upload another file</a></p>"#,
        escape(&error.to_string())
    );
    (error.status(), Html(layout("Upload failed", &body))).into_response()
}

pub fn render_stats(stats: &TrackStatistics) -> String {
    let mut rows = format!("<tr><th>Points</th><td>{}</td></tr>\n", stats.points);

    match &stats.bounds {
        Some(b) => {
            rows.push_str(&format!(
                "<tr><th>Latitude</th><td>{:.6} to {:.6}</td></tr>\n",
                b.min_lat, b.max_lat
            ));
            rows.push_str(&format!(
                "<tr><th>Longitude</th><td>{:.6} to {:.6}</td></tr>\n",
                b.min_lon, b.max_lon
            ));
        }
        None => rows.push_str("<tr><th>Bounds</th><td>none</td></tr>\n"),
    }

    rows.push_str(&format!(
        "<tr><th>Distance</th><td>{:.1} m ({:.2} km)</td></tr>\n",
        stats.distance_m,
        stats.distance_km()
    ));

    format!(
        r#"<table>
{rows}</table>
<p><a href="/">Upload another file</a></p>"#
    )
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
<h1>{title}</h1>
{body}
</body>
</html>"#,
        title = escape(title),
    )
}
