//! HTTP adapters - the viewer page, the source listing and the router.

pub mod dto;
pub mod pages;
pub mod routes;

pub use dto::{SourceMode, SourcesResponse};
pub use pages::{home_page, list_sources, render_home, PageState};
pub use routes::{app_router, page_routes, AppState};
