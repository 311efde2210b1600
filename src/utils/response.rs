//! Response bodies for the schedule API. The shapes here are the wire
//! contract the viewer clients already speak: mutations answer with a
//! `message` plus the assigned `id` or the row `changes` count, and errors
//! are a bare `{"error": …}` object.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct CreatedBody {
    pub message: String,
    pub id: i64,
}

#[derive(Serialize)]
pub struct ChangesBody {
    pub message: String,
    pub changes: u64,
}

#[derive(Serialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn created(id: i64, message: impl Into<String>) -> impl IntoResponse {
    let body = CreatedBody {
        message: message.into(),
        id,
    };
    (StatusCode::CREATED, Json(body))
}

pub fn changed(changes: u64, message: impl Into<String>) -> impl IntoResponse {
    let body = ChangesBody {
        message: message.into(),
        changes,
    };
    (StatusCode::OK, Json(body))
}

pub fn message(message: impl Into<String>) -> impl IntoResponse {
    let body = MessageBody {
        message: message.into(),
    };
    (StatusCode::OK, Json(body))
}

pub fn error_body(message: impl Into<String>, status: StatusCode) -> Response {
    let body = ErrorBody {
        error: message.into(),
    };

    (status, Json(body)).into_response()
}
