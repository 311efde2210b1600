use axum::{response::IntoResponse, response::Response, Json};
use serde::Serialize;

pub mod events;
pub mod live;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "plenum-server",
    };

    Json(payload).into_response()
}
