//! Void Wallet API
//!
//! HTTP endpoints exposing account generation, import and credential
//! validation from the void-wallet core.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use state::AppState;

/// Build the application with middleware for a configuration
pub fn app(config: &ApiConfig) -> Router {
    let state = Arc::new(AppState::new(config));
    let router = routes::router(state).layer(TraceLayer::new_for_http());

    if config.cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
