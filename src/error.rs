use crate::engine::Side;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("Both front and back images are required")]
    MissingImages,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Image too large: {size} bytes (max: {max} bytes)")]
    ImageTooLarge { size: usize, max: usize },

    #[error("Request body too large (max: {max} bytes)")]
    BodyTooLarge { max: usize },

    #[error("Preprocessing failed: {0}")]
    Preprocessing(String),

    #[error("OCR request for {side} image failed: {message}")]
    Service { side: Side, message: String },

    #[error("No text found from {0} image")]
    NoText(Side),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OcrError {
    fn status(&self) -> StatusCode {
        match self {
            OcrError::MissingImages | OcrError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            OcrError::ImageTooLarge { .. } | OcrError::BodyTooLarge { .. } => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            OcrError::Preprocessing(_)
            | OcrError::Service { .. }
            | OcrError::NoText(_)
            | OcrError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for OcrError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Client errors carry their own message; processing failures get a
        // generic message with the detail alongside.
        let body = if status.is_server_error() {
            ErrorResponse {
                success: false,
                message: "Error processing images".to_string(),
                error: Some(self.to_string()),
            }
        } else {
            ErrorResponse {
                success: false,
                message: self.to_string(),
                error: None,
            }
        };

        (status, Json(body)).into_response()
    }
}
