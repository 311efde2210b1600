use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One scheduled conference item, as committed to the store.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub time: String,
    pub location: String,
    pub organizer: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: EventType,
    pub day: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stored as lowercase TEXT in the `type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum EventType {
    Workshop,
    Speaker,
}

/// Raw create/update body. Every field is optional so that presence is
/// checked by the event service rather than rejected by serde, keeping the
/// missing-field case a 400 with the documented message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventInput {
    pub name: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub organizer: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub day: Option<i64>,
}

/// Validated business fields ready for the store. `kind` stays a raw string
/// here; the table's CHECK constraint is the boundary that rejects unknown
/// event types.
#[derive(Debug, Clone)]
pub struct EventFields {
    pub name: String,
    pub time: String,
    pub location: String,
    pub organizer: String,
    pub kind: String,
    pub day: i64,
}
