//! REST surface for the schedule.
//!
//! Every successful mutation re-reads the committed row and hands it to the
//! broadcast hub before the HTTP response is built. The hub only enqueues,
//! so responses never wait on WebSocket delivery.

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::{debug, info};

use crate::models::{Event, EventInput};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub day: Option<i64>,
}

pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Event>>, AppError> {
    debug!(day = ?query.day, "Listing events");
    let events = state.service.list_events(query.day).await?;
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Event>, AppError> {
    let event = state
        .service
        .get_event(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    Ok(Json(event))
}

pub async fn create_event(
    State(state): State<AppState>,
    Json(input): Json<EventInput>,
) -> Result<Response, AppError> {
    let id = state.service.create_event(input).await?;
    info!(id, "Event created");

    // Broadcast the committed row rather than the request payload so
    // sessions see the server-assigned id and timestamps.
    if let Ok(Some(event)) = state.service.get_event(id).await {
        state.hub.broadcast_created(&event).await;
    }

    Ok(response::created(id, "Event created successfully").into_response())
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<EventInput>,
) -> Result<Response, AppError> {
    let changes = state.service.update_event(id, input).await?;
    info!(id, changes, "Event updated");

    // An absent id touches no rows and the re-read finds nothing, so no
    // frame goes out; the response still reports success with changes: 0.
    if let Ok(Some(event)) = state.service.get_event(id).await {
        state.hub.broadcast_updated(&event).await;
    }

    Ok(response::changed(changes, "Event updated successfully").into_response())
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let changes = state.service.delete_event(id).await?;
    if changes == 0 {
        return Err(AppError::NotFound("Event not found".to_string()));
    }
    info!(id, "Event deleted");

    state.hub.broadcast_deleted(id).await;

    Ok(response::message("Event deleted successfully").into_response())
}
