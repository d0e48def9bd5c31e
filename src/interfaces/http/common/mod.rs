//! Shared HTTP response shapes and extractors.

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::DirectoryError;

/// Uniform API envelope: success flag, human-readable messages, and an
/// optional payload. Mirrors the service-result shape so every failure
/// renders the same way.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub messages: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            messages: Vec::new(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            messages: vec![message.into()],
            data: None,
        }
    }

    pub fn failure(messages: Vec<String>) -> Self {
        Self {
            success: false,
            messages,
            data: None,
        }
    }
}

/// Map a directory error onto a status code and uniform error body.
pub fn error_response<T>(err: DirectoryError) -> (StatusCode, Json<ApiResponse<T>>) {
    let status = match &err {
        DirectoryError::NotFound { .. } => StatusCode::NOT_FOUND,
        DirectoryError::Validation(_) => StatusCode::BAD_REQUEST,
        DirectoryError::Unauthorized(_) => StatusCode::FORBIDDEN,
        DirectoryError::CacheUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        DirectoryError::Store(_) => StatusCode::BAD_REQUEST,
    };

    (status, Json(ApiResponse::failure(err.messages())))
}
