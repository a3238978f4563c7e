use std::sync::Arc;

use crate::config::CatalogueConfig;
use crate::engine::Catalogue;

/// Shared application state passed to all handlers via Axum's State extractor.
pub struct AppState {
    /// Generated once at startup; read-only afterwards.
    pub catalogue: Catalogue,
    pub config: CatalogueConfig,
    pub start_time: std::time::Instant,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: CatalogueConfig, catalogue: Catalogue) -> SharedState {
        Arc::new(AppState {
            catalogue,
            config,
            start_time: std::time::Instant::now(),
        })
    }

    /// Generate the catalogue on a blocking thread and wrap it in state.
    pub async fn build(config: CatalogueConfig) -> SharedState {
        let catalogue = tokio::task::spawn_blocking(Catalogue::generate)
            .await
            .expect("catalogue generation panicked");
        AppState::new(config, catalogue)
    }
}
