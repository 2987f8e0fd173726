use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Deserializer, Serialize};

/// A stored text message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub text: String,
}

/// Request body accepted by create and update.
///
/// Any `id` sent by the client is ignored; the store owns identifiers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessagePayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
}

/// `"text": null` binds the same as a missing field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Table plus the id counter. Both live under one lock so id assignment
/// and insertion happen together.
#[derive(Debug)]
struct Inner {
    table: HashMap<i64, Message>,
    next_id: i64,
}

/// Shared message store used across the app.
///
/// Cloning is cheap and every clone sees the same table.
#[derive(Debug, Clone)]
pub struct MessageStore {
    inner: Arc<RwLock<Inner>>,
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageStore {
    /// Create a new, empty store. The first id issued is 1.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                table: HashMap::new(),
                next_id: 1,
            })),
        }
    }

    // No operation panics while holding the guard, so a poisoned lock
    // still protects consistent data.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of every stored message, in no particular order.
    pub fn list(&self) -> Vec<Message> {
        self.read().table.values().cloned().collect()
    }

    /// Assign the next id to `payload`, store it and return the new record.
    pub fn insert(&self, payload: MessagePayload) -> Message {
        let mut inner = self.write();

        let id = inner.next_id;
        inner.next_id += 1;

        let message = Message {
            id,
            text: payload.text,
        };
        inner.table.insert(id, message.clone());
        message
    }

    /// Replace the message stored at `id`. Returns `None` when there is
    /// nothing to replace; no entry is created in that case.
    pub fn replace(&self, id: i64, payload: MessagePayload) -> Option<Message> {
        let mut inner = self.write();

        let slot = inner.table.get_mut(&id)?;
        *slot = Message {
            id,
            text: payload.text,
        };
        Some(slot.clone())
    }

    /// Remove the message stored at `id`, returning it if it existed.
    pub fn remove(&self, id: i64) -> Option<Message> {
        self.write().table.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.read().table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The id the next successful insert will receive.
    pub fn next_id(&self) -> i64 {
        self.read().next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(text: &str) -> MessagePayload {
        MessagePayload {
            text: text.to_string(),
        }
    }

    #[test]
    fn new_store_is_empty_and_starts_at_one() {
        let store = MessageStore::new();
        assert!(store.is_empty());
        assert_eq!(store.next_id(), 1);
        assert!(store.list().is_empty());
    }

    #[test]
    fn insert_assigns_increasing_ids() {
        let store = MessageStore::new();
        let a = store.insert(payload("a"));
        let b = store.insert(payload("b"));

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.next_id(), 3);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn removed_ids_are_not_reused() {
        let store = MessageStore::new();
        let first = store.insert(payload("a"));
        assert!(store.remove(first.id).is_some());

        let second = store.insert(payload("b"));
        assert_eq!(second.id, 2);
        assert_eq!(store.list(), vec![second]);
    }

    #[test]
    fn replace_keeps_key_and_id_in_sync() {
        let store = MessageStore::new();
        let original = store.insert(payload("old"));

        let updated = store.replace(original.id, payload("new")).unwrap();
        assert_eq!(updated, Message { id: 1, text: "new".into() });
        assert_eq!(store.list(), vec![updated]);
    }

    #[test]
    fn replace_missing_does_not_insert() {
        let store = MessageStore::new();
        assert!(store.replace(7, payload("ghost")).is_none());
        assert!(store.is_empty());
        assert_eq!(store.next_id(), 1);
    }

    #[test]
    fn clones_share_the_same_table() {
        let store = MessageStore::new();
        let other = store.clone();
        other.insert(payload("shared"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn concurrent_inserts_get_distinct_ids() {
        let store = MessageStore::new();
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    (0..50)
                        .map(|i| store.insert(payload(&format!("{t}-{i}"))).id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<i64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();

        assert_eq!(ids, (1..=400).collect::<Vec<_>>());
        assert_eq!(store.len(), 400);
        assert_eq!(store.next_id(), 401);
    }

    #[test]
    fn payload_ignores_client_id_and_defaults_text() {
        let p: MessagePayload = serde_json::from_str(r#"{"id": 99, "text": "hi"}"#).unwrap();
        assert_eq!(p.text, "hi");

        let empty: MessagePayload = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.text, "");

        let null_text: MessagePayload = serde_json::from_str(r#"{"text": null}"#).unwrap();
        assert_eq!(null_text.text, "");
    }
}
