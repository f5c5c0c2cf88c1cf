//! HTTP API handlers

pub mod files;
pub mod health;
pub mod library;
pub mod titles;

pub use files::file_routes;
pub use health::health_routes;
pub use library::library_routes;
pub use titles::title_routes;
