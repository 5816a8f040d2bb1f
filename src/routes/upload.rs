use axum::extract::Multipart;
use axum::{routing::post, Json, Router};

use crate::error::AppError;
use crate::pipeline::parse;
use crate::state::AppState;
use crate::types::track::TrackStatistics;

/// Multipart field carrying the uploaded track.
pub const FILE_FIELD: &str = "gpxfile";

pub fn router() -> Router<AppState> {
    Router::new().route("/api/upload", post(upload))
}

pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

async fn upload(multipart: Multipart) -> Result<Json<TrackStatistics>, AppError> {
    let upload = read_upload(multipart).await?;
    let stats = analyze(&upload)?;
    Ok(Json(stats))
}

/// Pulls the track file out of a multipart form.
pub async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    let mut upload: Option<Upload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        // a plain form value under the file field name is not a file
        let Some(filename) = field.file_name().map(|s| s.to_string()) else {
            continue;
        };
        let bytes = field.bytes().await.map_err(|e| {
            AppError::BadRequest(format!("Failed to read file bytes: {}", e))
        })?;

        upload = Some(Upload {
            filename,
            bytes: bytes.to_vec(),
        });
    }

    let upload = upload.ok_or_else(|| {
        tracing::warn!("Rejected upload without a '{}' field", FILE_FIELD);
        AppError::BadRequest("No file part".to_string())
    })?;

    if upload.filename.is_empty() {
        tracing::warn!("Rejected upload with an empty file selection");
        return Err(AppError::BadRequest("No selected file".to_string()));
    }

    Ok(upload)
}

pub fn analyze(upload: &Upload) -> Result<TrackStatistics, AppError> {
    let stats = parse::parse_track(&upload.bytes).map_err(|e| {
        tracing::warn!("Failed to parse {}: {}", upload.filename, e);
        e
    })?;

    tracing::info!(
        "Analyzed {} ({} points, {:.2} km)",
        upload.filename,
        stats.points,
        stats.distance_km()
    );

    Ok(stats)
}
