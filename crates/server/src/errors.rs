use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, warn};

use service::ServiceError;

/// Every failure a handler or the request gate can produce.
///
/// Rendered as a plain-text body holding the display string.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("invalid body")]
    InvalidBody,
    #[error("authentication failed")]
    Unauthorized,
    #[error("Header Content-Type incorrect")]
    UnsupportedMediaType,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Service(ServiceError::EntityNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Service(_) | ApiError::InvalidBody => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        }
    }

    /// A path segment that is not a UUID.
    pub fn bad_id(raw: &str) -> Self { ApiError::Service(ServiceError::InvalidParam(raw.to_string())) }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(error = %rejection.body_text(), "request body rejected");
        ApiError::InvalidBody
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if matches!(self, ApiError::Service(ServiceError::Db(_))) {
            warn!(error = %self, "request failed in storage");
        }
        (status, self.to_string()).into_response()
    }
}

/// Parse a path id, echoing the raw text back on failure.
pub fn parse_id(raw: &str) -> Result<uuid::Uuid, ApiError> {
    uuid::Uuid::parse_str(raw).map_err(|_| ApiError::bad_id(raw))
}
