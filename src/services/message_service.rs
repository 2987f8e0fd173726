use serde_json::Error as JsonError;

use crate::errors::MessageError;
use crate::state::message::{Message, MessagePayload, MessageStore};

/// Parse an id taken from the request path.
pub fn parse_id(raw: &str) -> Result<i64, MessageError> {
    raw.parse::<i64>().map_err(|_| MessageError::InvalidId)
}

/// Decode a request body into a payload.
///
/// Only the first JSON value is read; anything after it is ignored.
/// An empty body or a bare `null` binds to an empty payload.
pub fn parse_payload(body: &[u8]) -> Result<MessagePayload, JsonError> {
    let mut values = serde_json::Deserializer::from_slice(body).into_iter::<Option<MessagePayload>>();

    match values.next() {
        Some(value) => Ok(value?.unwrap_or_default()),
        None => Ok(MessagePayload::default()),
    }
}

/// Return every stored message.
pub fn list(store: &MessageStore) -> Vec<Message> {
    let messages = store.list();
    tracing::debug!(count = messages.len(), "Listing messages");
    messages
}

/// Create a message from a raw body and return it with its new id.
pub fn create(store: &MessageStore, body: &[u8]) -> Result<Message, MessageError> {
    let payload = parse_payload(body).map_err(MessageError::AddFailed)?;

    let message = store.insert(payload);
    tracing::info!(id = message.id, "Message added");
    Ok(message)
}

/// Replace the message at `raw_id` with the payload in `body`.
///
/// Checks run in order: id, body, existence. The first failure wins.
pub fn update(store: &MessageStore, raw_id: &str, body: &[u8]) -> Result<Message, MessageError> {
    let id = parse_id(raw_id)?;
    let payload = parse_payload(body).map_err(MessageError::UpdateFailed)?;

    let message = store.replace(id, payload).ok_or(MessageError::NotFound)?;
    tracing::info!(id, "Message updated");
    Ok(message)
}

/// Remove the message at `raw_id`.
pub fn delete(store: &MessageStore, raw_id: &str) -> Result<Message, MessageError> {
    let id = parse_id(raw_id)?;

    let message = store.remove(id).ok_or(MessageError::NotFound)?;
    tracing::info!(id, "Message deleted");
    Ok(message)
}
