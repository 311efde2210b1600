//! Frames pushed to connected sessions. The event names and payload shapes
//! here are what deployed viewer clients dispatch on, so they must not
//! drift: `events_loaded` carries the full ordered list, `event_created`
//! and `event_updated` carry the committed row, `event_deleted` only the id.

use serde::Serialize;

use crate::models::Event;

#[derive(Debug, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
pub enum PushMessage<'a> {
    EventsLoaded(&'a [Event]),
    EventCreated(&'a Event),
    EventUpdated(&'a Event),
    EventDeleted { id: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventType;
    use chrono::Utc;
    use serde_json::json;

    fn sample_event() -> Event {
        let now = Utc::now();
        Event {
            id: 7,
            name: "Talk A".to_string(),
            time: "09:00".to_string(),
            location: "Hall".to_string(),
            organizer: "X".to_string(),
            kind: EventType::Speaker,
            day: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn created_frame_carries_the_full_row() {
        let event = sample_event();
        let value = serde_json::to_value(PushMessage::EventCreated(&event)).unwrap();

        assert_eq!(value["event"], "event_created");
        assert_eq!(value["payload"]["id"], 7);
        assert_eq!(value["payload"]["type"], "speaker");
        assert_eq!(value["payload"]["time"], "09:00");
        assert_eq!(value["payload"]["day"], 1);
    }

    #[test]
    fn updated_frame_uses_the_contract_name() {
        let event = sample_event();
        let value = serde_json::to_value(PushMessage::EventUpdated(&event)).unwrap();
        assert_eq!(value["event"], "event_updated");
    }

    #[test]
    fn deleted_frame_carries_only_the_id() {
        let value = serde_json::to_value(PushMessage::EventDeleted { id: 3 }).unwrap();
        assert_eq!(value, json!({"event": "event_deleted", "payload": {"id": 3}}));
    }

    #[test]
    fn loaded_frame_is_the_full_list() {
        let events = vec![sample_event()];
        let value = serde_json::to_value(PushMessage::EventsLoaded(&events)).unwrap();

        assert_eq!(value["event"], "events_loaded");
        assert_eq!(value["payload"].as_array().unwrap().len(), 1);
        assert_eq!(value["payload"][0]["name"], "Talk A");
    }
}
