//! Embedded static assets and the not-found fallback

use axum::{
    extract::Path,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

use super::middleware::WebError;

/// Stylesheet and scripts compiled into the binary
#[derive(RustEmbed)]
#[folder = "static/"]
#[include = "*"]
struct StaticAssets;

/// GET /static/{*path}
pub async fn serve_static(Path(path): Path<String>) -> Result<Response, WebError> {
    // URL decode the path to handle encoded characters like %20
    let decoded = urlencoding::decode(&path)
        .map(|p| p.into_owned())
        .unwrap_or(path);
    let asset_path = decoded.trim_start_matches('/');

    match StaticAssets::get(asset_path) {
        Some(content) => Ok(build_response(asset_path, content.data.into_owned())),
        None => {
            tracing::debug!("Static asset not found: {}", asset_path);
            Err(WebError::not_found(format!("No asset at /static/{asset_path}")))
        }
    }
}

/// Any route the router does not know
pub async fn fallback(uri: Uri) -> WebError {
    WebError::not_found(format!("Nothing lives at {}", uri.path()))
}

fn build_response(path: &str, data: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, get_content_type(path)),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        data,
    )
        .into_response()
}

fn get_content_type(path: &str) -> &'static str {
    match path.rsplit('.').next().unwrap_or("") {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
