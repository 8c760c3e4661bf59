//! WebSocket endpoint for realtime order and subscription events
//!
//! Server-to-client only: each hub event arrives as one text frame of
//! the `{"type", "data"}` envelope. Inbound frames carry no protocol and
//! are drained; a Close frame, stream end, or failed send tears the
//! connection down and deregisters the client.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};

use crate::core::AppState;

/// GET /ws: upgrade to WebSocket
pub async fn handle_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_connection(socket, state))
}

async fn handle_connection(socket: WebSocket, state: AppState) {
    let (client_id, mut rx) = state.hub.register();
    tracing::info!(client_id, "WebSocket client connected");

    let (mut ws_sink, mut ws_stream) = socket.split();

    loop {
        tokio::select! {
            frame = rx.recv() => {
                match frame {
                    Some(json) => {
                        if ws_sink.send(Message::Text(json.into())).await.is_err() {
                            tracing::debug!(client_id, "WebSocket send failed");
                            break;
                        }
                    }
                    // Hub dropped this client (send queue overflowed).
                    None => break,
                }
            }
            inbound = ws_stream.next() => {
                match inbound {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    // No client-to-server protocol; ignore.
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    state.hub.deregister(client_id);
    tracing::info!(client_id, "WebSocket client disconnected");
}
