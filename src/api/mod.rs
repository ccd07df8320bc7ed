pub mod errors;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::llm::ProviderRegistry;
use crate::prompts::PromptCatalog;

/// Read-only state shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub providers: Arc<ProviderRegistry>,
    pub catalog: Arc<PromptCatalog>,
}

pub fn create_app_state(settings: &Settings) -> AppState {
    AppState {
        providers: Arc::new(ProviderRegistry::standard(settings)),
        catalog: Arc::new(PromptCatalog::standard()),
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/call/{provider}", axum::routing::post(routes::call::call_provider))
        .route("/health", axum::routing::get(routes::health::health_check))
        .route("/levels", axum::routing::get(routes::levels::list_levels))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
