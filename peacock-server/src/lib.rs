//! HTTP serving layer for the audio library
//!
//! Owns the in-memory record list and exposes scanning, suggestion and
//! title-writing over JSON endpoints.

pub mod api;
pub mod error;
pub mod paths;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use server::PeacockServer;
pub use state::{AppState, Library};

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::library_routes())
        .merge(api::title_routes())
        .merge(api::file_routes())
        .merge(api::health_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
