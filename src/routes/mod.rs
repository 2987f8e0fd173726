use serde::Serialize;

pub mod message_routes;

/// `{"status": ..., "message": ...}` body returned by every mutating route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

impl StatusResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "Success".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "Error".to_string(),
            message: message.into(),
        }
    }
}
