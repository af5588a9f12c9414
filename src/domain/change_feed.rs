use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOp {
    Insert,
    Update,
    Delete,
}

/// One entity-store change notification, broadcast to subscribed admin
/// views after every successful write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub entity: String,
    pub op: ChangeOp,
    pub id: Uuid,
    /// Full row for insert/update; null for delete.
    pub payload: Value,
}

impl ChangeEvent {
    pub fn insert<T: Serialize>(entity: &str, id: Uuid, row: &T) -> Self {
        Self {
            entity: entity.to_string(),
            op: ChangeOp::Insert,
            id,
            payload: serde_json::to_value(row).unwrap_or(Value::Null),
        }
    }

    pub fn update<T: Serialize>(entity: &str, id: Uuid, row: &T) -> Self {
        Self {
            entity: entity.to_string(),
            op: ChangeOp::Update,
            id,
            payload: serde_json::to_value(row).unwrap_or(Value::Null),
        }
    }

    pub fn delete(entity: &str, id: Uuid) -> Self {
        Self {
            entity: entity.to_string(),
            op: ChangeOp::Delete,
            id,
            payload: Value::Null,
        }
    }
}

/// Merge a change event into a cached list of rows keyed by `"id"`.
///
/// Inserts append (or replace, if the id somehow already arrived), updates
/// replace in place and fall back to appending for unknown ids, deletes
/// remove. This is the client-side cache-patching contract made explicit and
/// testable without a network.
pub fn apply_change_event(mut rows: Vec<Value>, event: &ChangeEvent) -> Vec<Value> {
    let id = Value::String(event.id.to_string());
    let position = rows.iter().position(|row| row.get("id") == Some(&id));

    match event.op {
        ChangeOp::Insert | ChangeOp::Update => match position {
            Some(i) => rows[i] = event.payload.clone(),
            None => rows.push(event.payload.clone()),
        },
        ChangeOp::Delete => {
            if let Some(i) = position {
                rows.remove(i);
            }
        }
    }

    rows
}
