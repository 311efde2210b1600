use std::path::Path;

use axum::{routing::get, Router};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer};
use crate::handlers::{events, health_check, live};
use crate::state::AppState;

/// Assemble the full router: JSON API, the live WebSocket endpoint, and the
/// delegate and admin views with their static assets.
pub fn create_routes(state: AppState, static_dir: &str) -> Router {
    let static_root = Path::new(static_dir);

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/events",
            get(events::list_events).post(events::create_event),
        )
        .route(
            "/api/events/:id",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route("/ws", get(live::ws_handler))
        .route_service("/", ServeFile::new(static_root.join("delegate.html")))
        .route_service("/admin", ServeFile::new(static_root.join("admin.html")))
        .fallback_service(ServeDir::new(static_root))
        .layer(create_security_headers_layer())
        .layer(create_cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
