//! WebSocket upgrade handler for live tail connections.
//!
//! Handles the HTTP → WebSocket upgrade and hands the socket to the
//! session coordinator:
//! 1. Resolve the `file` query parameter against the registry
//! 2. Refuse unknown sources with 404 before upgrading
//! 3. Upgrade with the inbound size limit applied
//! 4. Run the session until either loop ends

use std::sync::Arc;

use axum::{
    extract::{
        ws::{rejection::WebSocketUpgradeRejection, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::{IntoResponse, Response},
};
use futures::StreamExt;
use http::StatusCode;
use serde::Deserialize;

use crate::domain::foundation::TailError;

use super::session::{SessionCoordinator, ValidatedSession};

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct TailState {
    /// Shared coordinator for all sessions.
    pub coordinator: Arc<SessionCoordinator>,
    /// Largest inbound message or frame accepted from a client.
    pub max_message_bytes: usize,
}

impl TailState {
    pub fn new(coordinator: Arc<SessionCoordinator>, max_message_bytes: usize) -> Self {
        Self {
            coordinator,
            max_message_bytes,
        }
    }
}

/// Query parameters for the upgrade request.
#[derive(Debug, Default, Deserialize)]
pub struct TailParams {
    /// Registered source to stream. Ignored in stdin mode.
    pub file: Option<String>,
}

/// Handle WebSocket upgrade requests for a tail session.
///
/// Route: `GET /ws?file=<path>`
pub async fn ws_handler(
    State(state): State<TailState>,
    Query(params): Query<TailParams>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let validated = match state.coordinator.validate(params.file.as_deref()) {
        Ok(validated) => validated,
        Err(err) => return (StatusCode::NOT_FOUND, err.to_string()).into_response(),
    };

    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => {
            let err = TailError::UpgradeFailed(rejection.body_text());
            tracing::warn!(
                session_id = %validated.id(),
                code = %err.code(),
                "{}",
                err
            );
            if let Err(e) = validated.abandon() {
                tracing::debug!(error = %e, "session could not be terminated");
            }
            return rejection.into_response();
        }
    };

    let session_id = validated.id();
    ws.max_message_size(state.max_message_bytes)
        .max_frame_size(state.max_message_bytes)
        .on_failed_upgrade(move |e: axum::Error| {
            let err = TailError::UpgradeFailed(e.to_string());
            tracing::warn!(session_id = %session_id, code = %err.code(), "{}", err);
        })
        .on_upgrade(move |socket| handle_socket(socket, validated, state.coordinator))
}

/// Runs one upgraded connection to completion.
async fn handle_socket(
    socket: WebSocket,
    validated: ValidatedSession,
    coordinator: Arc<SessionCoordinator>,
) {
    let (sender, receiver) = socket.split();

    // Outcomes are logged by the coordinator.
    let _ = coordinator.run(validated, sender, receiver).await;
}

/// Create axum router for the WebSocket endpoint.
pub fn websocket_router() -> axum::Router<TailState> {
    use axum::routing::get;

    axum::Router::new().route("/ws", get(ws_handler))
}
