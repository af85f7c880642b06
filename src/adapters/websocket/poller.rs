//! Line Poller - turns a pull-based source into a paced feed.

use std::time::Duration;

use tokio::time::{interval, timeout, Interval, MissedTickBehavior};

use crate::domain::source::{Line, SourceId};
use crate::ports::{SourceError, SourceReader};

/// Smallest poll interval accepted; shorter values are clamped.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Polls a [`SourceReader`] on a fixed cadence.
///
/// Each tick asks the reader for a line, bounded by one poll interval.
/// After a hit the poller keeps draining without waiting, up to
/// `max_lines_per_tick`, then goes back to the ticker. A read that
/// outlives its interval counts as "no data".
///
/// [`LinePoller::next_line`] is cancel-safe, so it can sit in a
/// `tokio::select!` next to the ping timer.
pub struct LinePoller {
    reader: Box<dyn SourceReader>,
    ticker: Interval,
    poll_interval: Duration,
    max_lines_per_tick: usize,
    drained: usize,
    wait_for_tick: bool,
}

impl LinePoller {
    pub fn new(
        reader: Box<dyn SourceReader>,
        poll_interval: Duration,
        max_lines_per_tick: usize,
    ) -> Self {
        let poll_interval = poll_interval.max(MIN_POLL_INTERVAL);
        let mut ticker = interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self {
            reader,
            ticker,
            poll_interval,
            max_lines_per_tick: max_lines_per_tick.max(1),
            drained: 0,
            wait_for_tick: true,
        }
    }

    pub fn source_id(&self) -> &SourceId {
        self.reader.source_id()
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Waits for the next line from the source.
    ///
    /// # Errors
    ///
    /// Returns the reader's `SourceError` when the source becomes
    /// unreadable; the session must end.
    pub async fn next_line(&mut self) -> Result<Line, SourceError> {
        loop {
            if self.wait_for_tick {
                self.ticker.tick().await;
                self.wait_for_tick = false;
                self.drained = 0;
            }

            match timeout(self.poll_interval, self.reader.next()).await {
                Ok(Ok(Some(line))) => {
                    self.drained += 1;
                    if self.drained >= self.max_lines_per_tick {
                        self.wait_for_tick = true;
                    }
                    return Ok(line);
                }
                Ok(Ok(None)) | Err(_) => self.wait_for_tick = true,
                Ok(Err(err)) => return Err(err),
            }
        }
    }
}
