//! WebSocket adapters for live tailing.
//!
//! # Architecture
//!
//! ```text
//!   GET /ws?file=…
//!        │
//!        ▼
//! ┌──────────────────────┐   404 on unknown source
//! │  SessionCoordinator   │──────────────────────────►
//! └──────────────────────┘
//!        │ upgrade + open source
//!        ├───────────────────────────────┐
//!        ▼                               ▼
//! ┌──────────────────────┐      ┌──────────────────────┐
//! │ writer task           │      │ reader task           │
//! │  LinePoller ─► Text   │      │  Pong ─► deadline     │
//! │  ping timer ─► Ping   │      │  anything else: drop  │
//! └──────────────────────┘      └──────────────────────┘
//!        └──────── first to exit tears down both ───────┘
//! ```
//!
//! # Components
//!
//! - [`poller`] - Line Poller over a source reader
//! - [`writer`] - Connection Writer (data + ping frames, write deadline)
//! - [`reader`] - Connection Reader (read deadline refreshed by pongs)
//! - [`session`] - Session Coordinator
//! - [`handler`] - Axum WebSocket upgrade handler

pub mod handler;
pub mod poller;
pub mod reader;
pub mod session;
pub mod writer;

pub use handler::{websocket_router, ws_handler, TailParams, TailState};
pub use poller::{LinePoller, MIN_POLL_INTERVAL};
pub use reader::run_reader;
pub use session::{SessionCoordinator, SessionOutcome, SessionSettings, ValidatedSession};
pub use writer::{run_writer, WriterSettings};
