// ./src/macros.rs

/// Content negotiation for handlers that serve a page and its data.
///
/// # Usage
///
/// ```ignore
/// // Both arms
/// apodview::respond!(req, {
///     html => html(markup),
///     json => json(record),
/// })
///
/// // HTML-only (JSON returns 406)
/// apodview::respond!(req, {
///     html => html(markup),
/// })
/// ```
/// Internal: wrap an expression in Ok(IntoResponse::into_response(...))
#[doc(hidden)]
#[macro_export]
macro_rules! __respond_ok {
    ($expr:expr) => {
        Ok::<_, axum::response::Response>(axum::response::IntoResponse::into_response($expr))
    };
}

/// Internal: 406 response for unsupported content type
#[doc(hidden)]
#[macro_export]
macro_rules! __respond_406 {
    ($label:expr) => {
        $crate::__respond_ok!((axum::http::StatusCode::NOT_ACCEPTABLE, $label))
    };
}

#[macro_export]
macro_rules! respond {
    // ── Both arms (html + json) ──────────────────────────────
    ($req:expr, { html => $html:expr, json => $json:expr $(,)? }) => {
        match $req.preferred_mode() {
            $crate::extract::RenderMode::Html => $crate::__respond_ok!($html),
            $crate::extract::RenderMode::Json => $crate::__respond_ok!($json),
        }
    };

    // ── HTML-only ────────────────────────────────────────────
    ($req:expr, { html => $html:expr $(,)? }) => {
        match $req.preferred_mode() {
            $crate::extract::RenderMode::Html => $crate::__respond_ok!($html),
            _ => $crate::__respond_406!("HTML required"),
        }
    };
}
