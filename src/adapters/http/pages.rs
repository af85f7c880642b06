//! Viewer page and source listing handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Json,
};
use http::header;

use crate::domain::source::SourceRegistry;

use super::dto::SourcesResponse;

const HOME_TEMPLATE: &str = include_str!("home.html");
const CONFIG_PLACEHOLDER: &str = "__WEBTAIL_CONFIG__";

/// State for the page-serving handlers.
#[derive(Clone)]
pub struct PageState {
    pub registry: Arc<SourceRegistry>,
}

impl PageState {
    pub fn new(registry: Arc<SourceRegistry>) -> Self {
        Self { registry }
    }
}

/// Serve the viewer page.
///
/// Route: `GET /`
pub async fn home_page(State(state): State<PageState>) -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "no-store")],
        Html(render_home(&state.registry)),
    )
}

/// List the selectable sources.
///
/// Route: `GET /api/sources`
pub async fn list_sources(State(state): State<PageState>) -> Json<SourcesResponse> {
    Json(SourcesResponse::from_registry(&state.registry))
}

/// Renders the viewer page with the source listing embedded as JSON.
pub fn render_home(registry: &SourceRegistry) -> String {
    let listing = SourcesResponse::from_registry(registry);
    let json = serde_json::to_string(&listing).unwrap_or_else(|_| "{}".to_string());
    HOME_TEMPLATE.replace(CONFIG_PLACEHOLDER, &script_safe(&json))
}

/// Escapes JSON so it cannot close the surrounding `<script>` element.
fn script_safe(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_source_listing() {
        let html = render_home(&SourceRegistry::new(["/var/log/app.log"]));
        assert!(html.contains(r#"{"mode":"files","sources":["/var/log/app.log"]}"#));
        assert!(!html.contains(CONFIG_PLACEHOLDER));
    }

    #[test]
    fn stdin_mode_page_renders() {
        let html = render_home(&SourceRegistry::stdin_only());
        assert!(html.contains(r#"{"mode":"stdin","sources":[]}"#));
    }

    #[test]
    fn hostile_path_cannot_break_out_of_script() {
        let html = render_home(&SourceRegistry::new(["/tmp/</script><b>.log"]));
        assert!(!html.contains("</script><b>"));
        assert!(html.contains(r"\u003c/script\u003e\u003cb\u003e"));
    }

    #[test]
    fn page_keeps_a_single_live_socket() {
        let html = render_home(&SourceRegistry::new(["/a.log", "/b.log"]));
        // Switching sources cancels any scheduled reconnect.
        assert!(html.contains("window.clearTimeout(reconnectTimer)"));
        // Frames from a replaced socket are dropped.
        let onmessage = html.find("socket.onmessage").unwrap();
        let append = html[onmessage..].find("append(event.data)").unwrap();
        assert!(html[onmessage..onmessage + append].contains("if (ws !== socket)"));
    }
}
