// ./src/extract.rs

use crate::{
    fetcher::CacheMode,
    headers::{ApodCache, ApodClient},
};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use headers::HeaderMapExt;

// ════════════════════════════════════════════════════════════
// 1. The Render Mode Enum
// ════════════════════════════════════════════════════════════
#[derive(Debug, PartialEq, Eq)]
pub enum RenderMode {
    Html,
    Json,
}

// ════════════════════════════════════════════════════════════
// 2. The Extractor Struct
// ════════════════════════════════════════════════════════════
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub is_client: bool,
    pub accepts_html: bool,
    pub accepts_json: bool,
    /// Set from the `apod-cache` header when present.
    pub cache: Option<CacheMode>,
}

#[async_trait]
impl<S> FromRequestParts<S> for RenderRequest
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Did client.js send this request?
        let is_client = parts.headers.typed_get::<ApodClient>().is_some();

        let cache = match parts.headers.typed_get::<ApodCache>() {
            Some(ApodCache(value)) => Some(
                value
                    .parse::<CacheMode>()
                    .map_err(|_| (StatusCode::BAD_REQUEST, "invalid apod-cache header"))?,
            ),
            None => None,
        };

        let accept_header = parts
            .headers
            .get(axum::http::header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        let (accepts_html, accepts_json) = negotiate(accept_header);

        Ok(RenderRequest {
            is_client,
            accepts_html,
            accepts_json,
            cache,
        })
    }
}

/// Returns `(accepts_html, accepts_json)` for an `Accept` header value.
///
/// HTML is only accepted when its best q-value is at least JSON's, so
/// `text/html;q=0.9, application/json` picks JSON.
fn negotiate(accept_header: &str) -> (bool, bool) {
    let mut max_html_q = 0.0_f32;
    let mut max_json_q = 0.0_f32;

    for part in accept_header.split(',') {
        let mut iter = part.split(';');
        let media_type = iter.next().unwrap_or("").trim();

        let q: f32 = iter
            .find_map(|param| param.trim().strip_prefix("q=").and_then(|v| v.parse().ok()))
            .unwrap_or(1.0);

        if media_type == "text/html" || media_type == "*/*" {
            max_html_q = max_html_q.max(q);
        }
        if media_type == "application/json" || media_type == "*/*" {
            max_json_q = max_json_q.max(q);
        }
    }

    let accepts_html = max_html_q > 0.0 && max_html_q >= max_json_q;
    let accepts_json = max_json_q > 0.0;
    (accepts_html, accepts_json)
}

// ════════════════════════════════════════════════════════════
// 3. Content Negotiation Logic
// ════════════════════════════════════════════════════════════
impl RenderRequest {
    /// Determines the format the handler should return based on headers.
    ///
    /// A request with no usable `Accept` header gets HTML: these are pages first.
    pub fn preferred_mode(&self) -> RenderMode {
        match (self.is_client, self.accepts_html, self.accepts_json) {
            (true, _, true) => RenderMode::Json,
            (_, true, _) => RenderMode::Html,
            (_, false, true) => RenderMode::Json,
            (_, false, false) => RenderMode::Html,
        }
    }

    /// The request's cache choice, or `default` when it didn't make one.
    pub fn cache_or(&self, default: CacheMode) -> CacheMode {
        self.cache.unwrap_or(default)
    }
}
