//! Error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pixagen_error::{GenerationErrorKind, PixagenError, PixagenErrorKind};
use serde_json::json;
use tracing::{error, warn};

/// A handler failure rendered as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError(PixagenError);

impl ApiError {
    /// HTTP status for this error.
    ///
    /// Client mistakes are 400, provider failures 502, everything else 500.
    pub fn status(&self) -> StatusCode {
        match self.0.generation_kind() {
            Some(kind) if kind.is_client_error() => StatusCode::BAD_REQUEST,
            Some(GenerationErrorKind::ProviderCallFailed { .. }) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the caller.
    ///
    /// Generation errors use the bare kind text so provider messages pass
    /// through verbatim; location details stay in the logs.
    pub fn message(&self) -> String {
        match self.0.kind() {
            PixagenErrorKind::Generation(e) => e.kind().to_string(),
            PixagenErrorKind::Config(e) => e.message.clone(),
            PixagenErrorKind::Http(e) => e.message.clone(),
        }
    }
}

impl From<PixagenError> for ApiError {
    fn from(err: PixagenError) -> Self {
        Self(err)
    }
}

impl From<GenerationErrorKind> for ApiError {
    #[track_caller]
    fn from(kind: GenerationErrorKind) -> Self {
        Self(PixagenError::from(kind))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = %status, error = %self.0, "Request failed");
        } else {
            warn!(status = %status, error = %self.0, "Request rejected");
        }
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}
