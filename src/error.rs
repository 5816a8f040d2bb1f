use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid GPX at byte {position}: {message}")]
    Xml { position: usize, message: String },
    #[error("Invalid GPX: unclosed element <{0}> at end of input")]
    UnclosedElement(String),
    #[error("Invalid GPX: no root element")]
    NoRootElement,
    #[error("Track point {index} is missing the '{attribute}' attribute")]
    MissingAttribute {
        index: usize,
        attribute: &'static str,
    },
    #[error("Track point {index} has a non-numeric '{attribute}' value: {value:?}")]
    InvalidCoordinate {
        index: usize,
        attribute: &'static str,
        value: String,
    },
    #[error("Track point {index} has an out-of-range '{attribute}' value: {value}")]
    OutOfRange {
        index: usize,
        attribute: &'static str,
        value: f64,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("{0}")]
    BadRequest(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Parse(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.to_string()
        }));

        (self.status(), body).into_response()
    }
}
