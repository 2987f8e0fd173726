use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::routes::StatusResponse;

/// Everything a message request can be rejected for.
///
/// All variants are client errors and map to 400; a missing message is
/// reported the same way as malformed input.
#[derive(Error, Debug)]
pub enum MessageError {
    #[error("ID is not correct")]
    InvalidId,

    #[error("Could not add the message")]
    AddFailed(#[source] serde_json::Error),

    #[error("Could not update the message")]
    UpdateFailed(#[source] serde_json::Error),

    #[error("Message was not found")]
    NotFound,
}

impl MessageError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

impl IntoResponse for MessageError {
    fn into_response(self) -> Response {
        match &self {
            MessageError::AddFailed(cause) | MessageError::UpdateFailed(cause) => {
                tracing::warn!(error = %cause, "{}", self);
            }
            _ => tracing::warn!("{}", self),
        }

        (self.status_code(), Json(StatusResponse::error(self.to_string()))).into_response()
    }
}
