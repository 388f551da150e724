use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::path::{Component, Path as FilePath, PathBuf};
use std::sync::Arc;
use log::{debug, error};

use crate::config::defaults::{INDEX_FILE, RSS_FILE};

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
const RSS_CONTENT_TYPE: &str = "application/rss+xml";

/// Serve the homepage
pub async fn serve_index(State(root): State<Arc<PathBuf>>) -> Response {
    serve_file(&root.join(INDEX_FILE)).await
}

/// Serve any file of the public directory
pub async fn serve_path(
    State(root): State<Arc<PathBuf>>,
    Path(path): Path<String>,
) -> Response {
    match resolve_path(&root, &path) {
        Some(file) => serve_file(&file).await,
        None => {
            debug!("Rejected request path: {}", path);
            not_found()
        }
    }
}

/// Map a request path to a file under `root`.
///
/// Only plain file names are accepted, so nothing outside `root` can be
/// reached.
pub fn resolve_path(root: &FilePath, request_path: &str) -> Option<PathBuf> {
    let relative = FilePath::new(request_path.trim_start_matches('/'));
    if relative.as_os_str().is_empty() {
        return Some(root.join(INDEX_FILE));
    }

    if !relative.components().all(|c| matches!(c, Component::Normal(_))) {
        return None;
    }

    Some(root.join(relative))
}

/// Content type of a generated file.
///
/// Posts are written without an extension and are HTML.
pub fn content_type(path: &FilePath) -> String {
    if path.file_name().and_then(|name| name.to_str()) == Some(RSS_FILE) {
        return RSS_CONTENT_TYPE.to_string();
    }

    match path.extension() {
        None => HTML_CONTENT_TYPE.to_string(),
        Some(_) => mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string(),
    }
}

async fn serve_file(path: &FilePath) -> Response {
    if !path.is_file() {
        return not_found();
    }

    match tokio::fs::read(path).await {
        Ok(content) => (
            [(header::CONTENT_TYPE, content_type(path))],
            Body::from(content),
        )
            .into_response(),
        Err(e) => {
            error!("Error reading {}: {}", path.display(), e);
            not_found()
        }
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Page not found").into_response()
}
