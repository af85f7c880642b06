//! Tail session configuration: poll cadence, deadlines and limits.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::source::DEFAULT_MAX_LINE_BYTES;

/// Timing and size limits applied to every tail session.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TailConfig {
    /// How often each session polls its source, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Deadline for a single outbound frame, in seconds
    #[serde(default = "default_write_timeout_secs")]
    pub write_timeout_secs: u64,

    /// Interval between liveness pings, in seconds
    #[serde(default = "default_ping_interval_secs")]
    pub ping_interval_secs: u64,

    /// Inbound deadline, refreshed by each pong, in seconds
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,

    /// Largest inbound message or frame accepted from a client
    #[serde(default = "default_max_message_bytes")]
    pub max_message_bytes: usize,

    /// Lines drained back-to-back before waiting for the next tick
    #[serde(default = "default_max_lines_per_tick")]
    pub max_lines_per_tick: usize,

    /// Longest line emitted before it is split
    #[serde(default = "default_max_line_bytes")]
    pub max_line_bytes: usize,

    /// Skip existing file content and only stream new appends
    #[serde(default)]
    pub start_at_end: bool,
}

impl TailConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }

    pub fn ping_interval(&self) -> Duration {
        Duration::from_secs(self.ping_interval_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    /// Validate tail configuration
    ///
    /// The ping interval must stay below the read timeout, otherwise a
    /// healthy client would be dropped between two pings.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.poll_interval_ms < 1 {
            return Err(ValidationError::PollIntervalTooShort);
        }
        if self.write_timeout_secs == 0 {
            return Err(ValidationError::ZeroTimeout("write_timeout_secs"));
        }
        if self.ping_interval_secs == 0 {
            return Err(ValidationError::ZeroTimeout("ping_interval_secs"));
        }
        if self.read_timeout_secs == 0 {
            return Err(ValidationError::ZeroTimeout("read_timeout_secs"));
        }
        if self.ping_interval_secs >= self.read_timeout_secs {
            return Err(ValidationError::PingNotBelowReadTimeout {
                ping_secs: self.ping_interval_secs,
                read_secs: self.read_timeout_secs,
            });
        }
        if self.max_message_bytes == 0 {
            return Err(ValidationError::ZeroLimit("max_message_bytes"));
        }
        if self.max_lines_per_tick == 0 {
            return Err(ValidationError::ZeroLimit("max_lines_per_tick"));
        }
        if self.max_line_bytes == 0 {
            return Err(ValidationError::ZeroLimit("max_line_bytes"));
        }
        Ok(())
    }
}

impl Default for TailConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            write_timeout_secs: default_write_timeout_secs(),
            ping_interval_secs: default_ping_interval_secs(),
            read_timeout_secs: default_read_timeout_secs(),
            max_message_bytes: default_max_message_bytes(),
            max_lines_per_tick: default_max_lines_per_tick(),
            max_line_bytes: default_max_line_bytes(),
            start_at_end: false,
        }
    }
}

fn default_poll_interval_ms() -> u64 {
    10
}

fn default_write_timeout_secs() -> u64 {
    10
}

fn default_ping_interval_secs() -> u64 {
    27
}

fn default_read_timeout_secs() -> u64 {
    60
}

fn default_max_message_bytes() -> usize {
    512
}

fn default_max_lines_per_tick() -> usize {
    64
}

fn default_max_line_bytes() -> usize {
    DEFAULT_MAX_LINE_BYTES
}
