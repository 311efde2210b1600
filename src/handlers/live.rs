//! WebSocket endpoint for live schedule updates.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::hub::BroadcastHub;
use crate::state::AppState;

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_session(socket, state.hub))
}

/// One connected viewer. The hub writes frames into the channel and the
/// pump task forwards them to the socket until either side goes away.
async fn handle_session(socket: WebSocket, hub: Arc<BroadcastHub>) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let session_id = hub.connect(tx).await;

    let send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sink.send(Message::Text(frame)).await.is_err() {
                break;
            }
        }
    });

    // Viewers send nothing the server acts on; keep reading so close frames
    // and pings are still processed.
    while let Some(Ok(frame)) = stream.next().await {
        if let Message::Close(_) = frame {
            break;
        }
    }

    hub.disconnect(session_id).await;
    send_task.abort();
}
