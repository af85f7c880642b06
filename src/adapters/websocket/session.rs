//! Session Coordinator - validates a request and runs one tail session.
//!
//! # Lifecycle
//!
//! 1. `validate` moves a new session through Pending → Validating and
//!    resolves the requested source, before any upgrade happens
//! 2. `run` opens the source, goes Active, and spawns the writer and
//!    reader tasks
//! 3. When either task returns, the other is aborted and joined, the
//!    socket halves and the source are dropped, and the session is
//!    Terminated

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::Message;
use futures::{Sink, SinkExt, Stream};
use tokio::task::JoinHandle;

use crate::config::TailConfig;
use crate::domain::foundation::{SessionId, TailError};
use crate::domain::session::{SessionState, TailSession, TerminationReason};
use crate::domain::source::{SourceId, SourceRegistry};
use crate::ports::SourceOpener;

use super::poller::LinePoller;
use super::reader::run_reader;
use super::writer::{run_writer, WriterSettings};

/// Per-session timing, derived from [`TailConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub poll_interval: Duration,
    pub max_lines_per_tick: usize,
    pub write_timeout: Duration,
    pub ping_interval: Duration,
    pub read_timeout: Duration,
}

impl SessionSettings {
    pub fn writer(&self) -> WriterSettings {
        WriterSettings {
            write_timeout: self.write_timeout,
            ping_interval: self.ping_interval,
        }
    }
}

impl From<&TailConfig> for SessionSettings {
    fn from(config: &TailConfig) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            max_lines_per_tick: config.max_lines_per_tick,
            write_timeout: config.write_timeout(),
            ping_interval: config.ping_interval(),
            read_timeout: config.read_timeout(),
        }
    }
}

/// A session that passed validation and is waiting for its socket.
#[derive(Debug)]
pub struct ValidatedSession {
    session: TailSession,
    source: SourceId,
}

impl ValidatedSession {
    pub fn id(&self) -> SessionId {
        self.session.id()
    }

    pub fn source(&self) -> &SourceId {
        &self.source
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Ends a session whose connection was never upgraded.
    pub fn abandon(mut self) -> Result<SessionState, TailError> {
        self.session.terminate()?;
        Ok(self.session.state())
    }
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub session_id: SessionId,
    pub source: SourceId,
    pub reason: TerminationReason,
    pub state: SessionState,
}

/// Wires sources to sockets for every session.
///
/// Holds only immutable data, so one instance is shared by all
/// connections behind an `Arc`.
pub struct SessionCoordinator {
    registry: Arc<SourceRegistry>,
    opener: Arc<dyn SourceOpener>,
    settings: SessionSettings,
}

impl SessionCoordinator {
    pub fn new(
        registry: Arc<SourceRegistry>,
        opener: Arc<dyn SourceOpener>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            registry,
            opener,
            settings,
        }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Resolves the requested source for a new session.
    ///
    /// Runs before the upgrade; a rejected request never opens anything.
    ///
    /// # Errors
    ///
    /// Returns `TailError::InvalidSource` when a registry is configured
    /// and `requested` is not in it.
    pub fn validate(&self, requested: Option<&str>) -> Result<ValidatedSession, TailError> {
        let mut session = TailSession::new();
        session.begin_validation()?;

        match self.registry.resolve(requested) {
            Ok(source) => {
                session.bind(source.clone())?;
                tracing::debug!(session_id = %session.id(), source = %source, "source validated");
                Ok(ValidatedSession { session, source })
            }
            Err(err) => {
                session.terminate()?;
                tracing::warn!(
                    session_id = %session.id(),
                    requested = requested.unwrap_or_default(),
                    code = %err.code(),
                    "rejecting tail request: {}",
                    err
                );
                Err(err)
            }
        }
    }

    /// Runs a validated session over an upgraded connection.
    ///
    /// Returns once both loops have stopped and every resource of the
    /// session has been released.
    ///
    /// # Errors
    ///
    /// Returns `TailError::SourceUnreadable` if the source cannot be
    /// opened; the connection is closed without streaming anything.
    pub async fn run<S, St, E>(
        &self,
        validated: ValidatedSession,
        mut sink: S,
        stream: St,
    ) -> Result<SessionOutcome, TailError>
    where
        S: Sink<Message> + Unpin + Send + 'static,
        S::Error: Display + Send,
        St: Stream<Item = Result<Message, E>> + Unpin + Send + 'static,
        E: Display + Send + 'static,
    {
        let ValidatedSession {
            mut session,
            source,
        } = validated;
        let session_id = session.id();

        let reader = match self.opener.open(&source).await {
            Ok(reader) => reader,
            Err(err) => {
                session.terminate()?;
                let _ = tokio::time::timeout(self.settings.write_timeout, sink.close()).await;
                let err = TailError::from(err);
                tracing::warn!(session_id = %session_id, code = %err.code(), "{}", err);
                return Err(err);
            }
        };

        session.activate()?;
        tracing::info!(session_id = %session_id, source = %source, "tail session started");

        let poller = LinePoller::new(
            reader,
            self.settings.poll_interval,
            self.settings.max_lines_per_tick,
        );
        let mut writer = tokio::spawn(run_writer(sink, poller, self.settings.writer()));
        let mut reader = tokio::spawn(run_reader(stream, self.settings.read_timeout));

        let reason = tokio::select! {
            result = &mut writer => {
                stop(reader).await;
                joined(result)
            }
            result = &mut reader => {
                stop(writer).await;
                joined(result)
            }
        };

        session.terminate()?;
        let err = reason.to_error(&source);
        tracing::info!(
            session_id = %session_id,
            source = %source,
            reason = %reason,
            code = %err.code(),
            "tail session ended"
        );

        Ok(SessionOutcome {
            session_id,
            source,
            reason,
            state: session.state(),
        })
    }
}

/// Aborts a session task and waits until it has been dropped.
async fn stop(handle: JoinHandle<TerminationReason>) {
    handle.abort();
    let _ = handle.await;
}

fn joined(result: Result<TerminationReason, tokio::task::JoinError>) -> TerminationReason {
    result.unwrap_or_else(|e| TerminationReason::TaskFailed(e.to_string()))
}
