// ./src/assets.rs

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// The client-rendered view script, minified at build time.
pub const CLIENT_JS: &str = include_str!(concat!(env!("OUT_DIR"), "/client.min.js"));

/// Short content hash of [`CLIENT_JS`], used to bust browser caches.
pub const CLIENT_JS_HASH: &str = env!("APOD_CLIENT_JS_HASH");

/// Canonical URL path for serving the client script.
pub const CLIENT_JS_PATH: &str = "/_apod/client.js";

/// Axum handler that serves the embedded client script with aggressive caching.
pub async fn serve_client_js() -> Response {
    (
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "application/javascript; charset=utf-8",
            ),
            (header::CACHE_CONTROL, "public, max-age=31536000, immutable"),
        ],
        CLIENT_JS,
    )
        .into_response()
}

/// Returns a `<script>` tag for the client script, versioned by content hash.
pub fn script_tag() -> String {
    format!(r#"<script src="{CLIENT_JS_PATH}?v={CLIENT_JS_HASH}" defer></script>"#)
}
