//! API Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use inference_engine::InferenceError;
use serde::Serialize;
use thiserror::Error;

/// Errors returned by request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Artifacts failed to load at startup
    #[error("Model not loaded: {0}")]
    Unavailable(String),
    /// Request body could not be read as a house record
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Unavailable(_) => "unavailable",
            ApiError::InvalidBody(_) => "invalid_body",
            ApiError::Inference(e) => e.kind(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Inference(InferenceError::EncodingError(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
            kind: self.kind(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_encoder::EncodingError;

    #[test]
    fn test_status_mapping() {
        let err = ApiError::from(InferenceError::EncodingError(
            EncodingError::UnknownFurnishing("x".to_string()),
        ));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.kind(), "encoding");

        let err = ApiError::from(InferenceError::ScalingError("bad".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = ApiError::Unavailable("missing".to_string());
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);

        let err = ApiError::InvalidBody("missing field `bedrooms`".to_string());
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.kind(), "invalid_body");
    }
}
