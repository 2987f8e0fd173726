use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    routing::{get, patch},
    Json, Router,
};

use crate::errors::MessageError;
use crate::routes::StatusResponse;
use crate::services::message_service;
use crate::state::message::{Message, MessageStore};

/// Build all message routes under /message
pub fn routes(store: MessageStore) -> Router {
    Router::new()
        .route("/", get(list_messages).post(create_message))
        .route("/:id", patch(update_message).delete(delete_message))
        .with_state(store)
}

//
// ─────────────────────────────────────────────────────────────
// GET /message
// All stored messages, possibly an empty array
// ─────────────────────────────────────────────────────────────
//
async fn list_messages(
    State(store): State<MessageStore>,
) -> Json<Vec<Message>>
{
    Json(message_service::list(&store))
}

//
// ─────────────────────────────────────────────────────────────
// POST /message
// Store a new message under the next id
// ─────────────────────────────────────────────────────────────
//
// The body is taken raw so decode failures get our error envelope
// instead of the extractor's rejection.
async fn create_message(
    State(store): State<MessageStore>,
    body: Bytes,
) -> Result<Json<StatusResponse>, MessageError>
{
    message_service::create(&store, &body)?;
    Ok(Json(StatusResponse::success("Message was added successfully")))
}

//
// ─────────────────────────────────────────────────────────────
// PATCH /message/{id}
// Replace the text of an existing message
// ─────────────────────────────────────────────────────────────
//
async fn update_message(
    id: Result<Path<String>, PathRejection>,
    State(store): State<MessageStore>,
    body: Bytes,
) -> Result<Json<StatusResponse>, MessageError>
{
    let id = path_id(id)?;
    message_service::update(&store, &id, &body)?;
    Ok(Json(StatusResponse::success("Message was updated successfully")))
}

//
// ─────────────────────────────────────────────────────────────
// DELETE /message/{id}
// Remove a message if it exists
// ─────────────────────────────────────────────────────────────
//
async fn delete_message(
    id: Result<Path<String>, PathRejection>,
    State(store): State<MessageStore>,
) -> Result<Json<StatusResponse>, MessageError>
{
    let id = path_id(id)?;
    message_service::delete(&store, &id)?;
    Ok(Json(StatusResponse::success("Message was deleted successfully")))
}

/// A segment that fails to decode (e.g. invalid UTF-8) is just a bad id.
fn path_id(id: Result<Path<String>, PathRejection>) -> Result<String, MessageError> {
    match id {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Undecodable id segment");
            Err(MessageError::InvalidId)
        }
    }
}
