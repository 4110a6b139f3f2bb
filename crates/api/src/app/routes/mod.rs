use axum::{Router, routing::get};

pub mod lessons;
pub mod orders;
pub mod system;

/// Router for all API endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .nest("/lessons", lessons::router())
        .nest("/orders", orders::router())
}
