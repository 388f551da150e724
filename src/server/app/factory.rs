use axum::{routing::get, Router};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;

use crate::server::handlers::{serve_index, serve_path};

/// Create the router serving the generated site from `public_dir`
pub fn create_app(public_dir: PathBuf) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/{*path}", get(serve_path))
        .layer(CompressionLayer::new())
        .with_state(Arc::new(public_dir))
}
