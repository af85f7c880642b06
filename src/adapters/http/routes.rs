//! Axum router configuration for the whole service.

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::adapters::websocket::{websocket_router, SessionCoordinator, TailState};
use crate::domain::source::SourceRegistry;

use super::pages::{home_page, list_sources, PageState};

/// State for every route, split per router when the app is built.
#[derive(Clone)]
pub struct AppState {
    pub pages: PageState,
    pub tail: TailState,
}

impl AppState {
    pub fn new(
        registry: Arc<SourceRegistry>,
        coordinator: Arc<SessionCoordinator>,
        max_message_bytes: usize,
    ) -> Self {
        Self {
            pages: PageState::new(registry),
            tail: TailState::new(coordinator, max_message_bytes),
        }
    }
}

/// Create the page routes.
///
/// # Routes
/// - `GET /` - Viewer page
/// - `GET /api/sources` - Source listing as JSON
pub fn page_routes() -> Router<PageState> {
    Router::new()
        .route("/", get(home_page))
        .route("/api/sources", get(list_sources))
}

/// Create the complete application router.
///
/// Page routes get a request timeout; the upgrade route does not, since
/// an upgraded session is bounded by its own read and write deadlines.
pub fn app_router(state: AppState, request_timeout: Duration) -> Router {
    let pages = page_routes()
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state.pages);
    let tail = websocket_router().with_state(state.tail);

    Router::new()
        .merge(pages)
        .merge(tail)
        .layer(TraceLayer::new_for_http())
}
