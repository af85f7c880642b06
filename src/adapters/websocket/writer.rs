//! Connection Writer - the only task that writes to a session's socket.

use std::fmt::Display;
use std::time::Duration;

use axum::extract::ws::Message;
use futures::{Sink, SinkExt};
use tokio::time::{interval_at, timeout, Instant, MissedTickBehavior};

use crate::domain::session::TerminationReason;

use super::poller::LinePoller;

/// Deadlines for the outbound half of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterSettings {
    /// Upper bound on any single frame write.
    pub write_timeout: Duration,
    /// Gap between liveness pings.
    pub ping_interval: Duration,
}

/// Runs the poll+write loop until the first failure.
///
/// Lines from the poller go out as text frames, newline included;
/// the ping timer sends empty Ping frames. Both are written from this
/// one task, so frames never interleave. Every write is bounded by
/// `write_timeout`, and the first failed or late write ends the loop.
/// A best-effort close is attempted before returning.
pub async fn run_writer<S>(
    mut sink: S,
    mut poller: LinePoller,
    settings: WriterSettings,
) -> TerminationReason
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    let mut ping = interval_at(
        Instant::now() + settings.ping_interval,
        settings.ping_interval,
    );
    ping.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let reason = loop {
        tokio::select! {
            next = poller.next_line() => match next {
                Ok(line) => {
                    tracing::trace!(bytes = line.len(), "sending line");
                    let frame = Message::Text(line.into_text());
                    if let Err(reason) = send_frame(&mut sink, frame, settings.write_timeout).await {
                        break reason;
                    }
                }
                Err(err) => break TerminationReason::SourceUnreadable(err.to_string()),
            },
            _ = ping.tick() => {
                tracing::trace!("sending ping");
                if let Err(reason) = send_frame(&mut sink, Message::Ping(Vec::new()), settings.write_timeout).await {
                    break reason;
                }
            }
        }
    };

    let _ = timeout(settings.write_timeout, sink.close()).await;
    reason
}

async fn send_frame<S>(
    sink: &mut S,
    frame: Message,
    write_timeout: Duration,
) -> Result<(), TerminationReason>
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    match timeout(write_timeout, sink.send(frame)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(TerminationReason::WriteFailed(e.to_string())),
        Err(_) => Err(TerminationReason::WriteTimedOut),
    }
}
