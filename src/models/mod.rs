pub mod event;

pub use event::{Event, EventFields, EventInput, EventType};
