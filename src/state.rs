use std::sync::Arc;

use crate::hub::BroadcastHub;
use crate::service::EventService;

/// Shared handles cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: EventService,
    pub hub: Arc<BroadcastHub>,
}

impl AppState {
    pub fn new(service: EventService, hub: Arc<BroadcastHub>) -> Self {
        Self { service, hub }
    }
}
