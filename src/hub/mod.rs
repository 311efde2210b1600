//! Fan-out of schedule changes to connected viewer sessions.
//!
//! The hub keeps an explicit registry of sessions keyed by id. Each entry is
//! a plain channel sender; the WebSocket handler owns the socket itself and
//! pumps whatever lands on the channel out to the peer. Broadcasting is
//! enqueue-only and never blocks on a slow client.

use std::collections::HashMap;

use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::Event;
use crate::service::EventService;

pub mod message;

pub use message::PushMessage;

pub struct BroadcastHub {
    service: EventService,
    sessions: RwLock<HashMap<Uuid, UnboundedSender<String>>>,
}

impl BroadcastHub {
    pub fn new(service: EventService) -> Self {
        Self {
            service,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Register a session and push it the current schedule. The initial sync
    /// is best effort: if the read fails the session stays registered and
    /// simply starts from an empty view.
    pub async fn connect(&self, sender: UnboundedSender<String>) -> Uuid {
        let session_id = Uuid::new_v4();

        let total = {
            let mut sessions = self.sessions.write().await;
            sessions.insert(session_id, sender.clone());
            sessions.len()
        };
        info!(session = %session_id, total, "Client connected");

        match self.service.list_events(None).await {
            Ok(events) => send_frame(&sender, &PushMessage::EventsLoaded(&events)),
            Err(e) => warn!(session = %session_id, error = %e, "Initial schedule sync failed"),
        }

        session_id
    }

    pub async fn disconnect(&self, session_id: Uuid) {
        let total = {
            let mut sessions = self.sessions.write().await;
            sessions.remove(&session_id);
            sessions.len()
        };
        info!(session = %session_id, total, "Client disconnected");
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn broadcast_created(&self, event: &Event) {
        self.broadcast(&PushMessage::EventCreated(event)).await;
    }

    pub async fn broadcast_updated(&self, event: &Event) {
        self.broadcast(&PushMessage::EventUpdated(event)).await;
    }

    pub async fn broadcast_deleted(&self, id: i64) {
        self.broadcast(&PushMessage::EventDeleted { id }).await;
    }

    /// Serialize once, then send to every live session, the originator's own
    /// included. A session whose channel is already closed just misses the
    /// frame; it is removed from the registry when its handler exits.
    async fn broadcast(&self, message: &PushMessage<'_>) {
        let Ok(frame) = serde_json::to_string(message) else {
            return;
        };

        let sessions = self.sessions.read().await;
        for sender in sessions.values() {
            let _ = sender.send(frame.clone());
        }
    }
}

fn send_frame(sender: &UnboundedSender<String>, message: &PushMessage<'_>) {
    if let Ok(frame) = serde_json::to_string(message) {
        let _ = sender.send(frame);
    }
}
