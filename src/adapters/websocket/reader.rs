//! Connection Reader - drains inbound frames and detects dead peers.

use std::fmt::Display;
use std::time::Duration;

use axum::extract::ws::Message;
use futures::{Stream, StreamExt};
use tokio::time::{timeout_at, Instant};

use crate::domain::session::TerminationReason;

/// Reads the inbound half until the peer is gone.
///
/// The deadline starts at `read_timeout` and is pushed forward only by
/// a Pong, the client's answer to our liveness pings. Any other frame
/// is read and dropped. Returns on deadline expiry, transport error,
/// close frame or end of stream; a silently vanished client is caught
/// within one `read_timeout` of its last pong.
pub async fn run_reader<St, E>(mut stream: St, read_timeout: Duration) -> TerminationReason
where
    St: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
{
    let mut deadline = Instant::now() + read_timeout;

    loop {
        match timeout_at(deadline, stream.next()).await {
            Err(_) => return TerminationReason::ReadDeadlineExpired,
            Ok(None) => return TerminationReason::ClientClosed,
            Ok(Some(Err(e))) => return TerminationReason::ReadFailed(e.to_string()),
            Ok(Some(Ok(Message::Close(frame)))) => {
                tracing::debug!(?frame, "client sent close frame");
                return TerminationReason::ClientClosed;
            }
            Ok(Some(Ok(Message::Pong(_)))) => {
                deadline = Instant::now() + read_timeout;
                tracing::trace!("pong received, read deadline refreshed");
            }
            Ok(Some(Ok(_))) => {
                // Pings are answered by the transport; data is ignored.
                tracing::trace!("ignoring inbound frame");
            }
        }
    }
}
