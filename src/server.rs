//! Server assembly: builds the app from configuration and serves it.

use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::adapters::{app_router, AppState, LocalSourceOpener, SessionCoordinator, SessionSettings};
use crate::config::AppConfig;
use crate::domain::source::SourceRegistry;
use crate::ports::SourceOpener;

/// Errors that stop the whole process.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Builds the application router around `opener`.
pub fn build_app(
    config: &AppConfig,
    registry: SourceRegistry,
    opener: Arc<dyn SourceOpener>,
) -> Router {
    let registry = Arc::new(registry);
    let coordinator = Arc::new(SessionCoordinator::new(
        registry.clone(),
        opener,
        SessionSettings::from(&config.tail),
    ));

    app_router(
        AppState::new(registry, coordinator, config.tail.max_message_bytes),
        config.server.request_timeout(),
    )
}

/// Serves `app` on an already bound listener until the listener fails.
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), ServerError> {
    axum::serve(listener, app).await?;
    Ok(())
}

/// Binds the configured address and serves local sources.
///
/// Only a bind or accept-loop failure returns; session failures are
/// handled inside their sessions.
pub async fn run(config: AppConfig, registry: SourceRegistry) -> Result<(), ServerError> {
    let address = config.server.listen_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;

    if registry.is_stdin_mode() {
        tracing::info!(address = %address, "webtail listening, streaming standard input");
    } else {
        tracing::info!(
            address = %address,
            sources = registry.len(),
            "webtail listening"
        );
    }

    let opener = Arc::new(LocalSourceOpener::from_config(&config.tail));
    serve(listener, build_app(&config, registry, opener)).await
}
