use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use types::ErrorResponse;

/// Every failure the service reports. All runtime failures share one status
/// and differ only in their message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Error extracting transcript: {0}")]
    Transcript(String),
    #[error("Error generating summary: {0}")]
    Generation(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("{0}")]
    InvalidQuery(String),
    #[error("No favicon")]
    NoFavicon,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Transcript(_) | Self::Generation(_) | Self::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::InvalidQuery(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NoFavicon => StatusCode::NOT_FOUND,
        };

        (
            status,
            Json(ErrorResponse {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}
