//! CRUD operations over the event store. The service is the only caller of
//! the store's mutating operations and applies the field-presence rule
//! before anything touches the database; it does not notify anyone, that is
//! the gateway's job.

use crate::models::{Event, EventFields, EventInput};
use crate::store::EventStore;
use crate::utils::error::AppError;

#[derive(Clone)]
pub struct EventService {
    store: EventStore,
}

impl EventService {
    pub fn new(store: EventStore) -> Self {
        Self { store }
    }

    /// Validate and insert. Returns the assigned id.
    pub async fn create_event(&self, input: EventInput) -> Result<i64, AppError> {
        let fields = validate(input)?;
        Ok(self.store.create(&fields).await?)
    }

    /// Validate and replace an existing row's business fields. A zero count
    /// means the id does not exist and is still reported as success; only
    /// delete treats a missing id as an error.
    pub async fn update_event(&self, id: i64, input: EventInput) -> Result<u64, AppError> {
        let fields = validate(input)?;
        Ok(self.store.update(id, &fields).await?)
    }

    pub async fn delete_event(&self, id: i64) -> Result<u64, AppError> {
        Ok(self.store.delete(id).await?)
    }

    pub async fn get_event(&self, id: i64) -> Result<Option<Event>, AppError> {
        Ok(self.store.get(id).await?)
    }

    pub async fn list_events(&self, day: Option<i64>) -> Result<Vec<Event>, AppError> {
        Ok(self.store.list(day).await?)
    }
}

/// Require all six business fields. "Missing" follows the loose rule the
/// clients rely on: absent, empty string, and a zero day all fail alike.
fn validate(input: EventInput) -> Result<EventFields, AppError> {
    let EventInput {
        name,
        time,
        location,
        organizer,
        kind,
        day,
    } = input;

    let (Some(name), Some(time), Some(location), Some(organizer), Some(kind), Some(day)) =
        (name, time, location, organizer, kind, day)
    else {
        return Err(missing_fields());
    };

    if name.is_empty()
        || time.is_empty()
        || location.is_empty()
        || organizer.is_empty()
        || kind.is_empty()
        || day == 0
    {
        return Err(missing_fields());
    }

    Ok(EventFields {
        name,
        time,
        location,
        organizer,
        kind,
        day,
    })
}

fn missing_fields() -> AppError {
    AppError::ValidationError("All fields are required".to_string())
}
