use std::path::Path;
use std::sync::Arc;

use axum::Extension;
use axum::http::{Method, header};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::app::services::AppServices;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Assemble the full application router.
///
/// `public_dir` backs the static file surface: the whole directory is served
/// as a fallback and its `images/` subdirectory is additionally mounted at
/// `/images`, so image URLs work without a path prefix.
pub fn build_app(services: Arc<AppServices>, public_dir: &Path) -> axum::Router {
    // The site frontend is hosted elsewhere, so the browser needs a
    // permissive CORS policy for the three verbs the API speaks.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE]);

    routes::router()
        .nest_service("/images", ServeDir::new(public_dir.join("images")))
        .fallback_service(ServeDir::new(public_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(Extension(services)),
        )
}
