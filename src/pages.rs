// ./src/pages.rs
//
// Full-page markup for both rendering modes and the error boundary.

use crate::{
    assets,
    error::FetchFailure,
    record::Record,
    response::{html, HtmlResponse, ResponseExt},
    view::{self, ClientView},
    StatusCode,
};
use html_escape::encode_text;

pub const SSR_PATH: &str = "/ssr";
pub const STATIC_PATH: &str = "/static";

const STYLE: &str = r#"<style>
  body { font-family: system-ui, sans-serif; margin: 0; background: #0b0d17; color: #e8e8f0; }
  a { color: #8ab4f8; }
  .main { display: flex; flex-direction: column; align-items: center; gap: 1rem; padding: 2rem; }
  .mode { font-size: 0.9rem; letter-spacing: 0.2em; opacity: 0.7; }
  .title { font-size: 1.6rem; font-weight: 600; text-align: center; }
  .description { max-width: 60rem; line-height: 1.5; }
  .date, .copyright { font-size: 0.85rem; opacity: 0.7; }
  .error { color: #ff8a80; }
</style>"#;

// ── Layout ──────────────────────────────────────────────────

fn layout(title: &str, body: &str, script: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{title} | APOD</title>
  {STYLE}
  {script}
</head>
<body>
  <nav class="main"><div><a href="/">Home</a> | <a href="{SSR_PATH}">Server rendered</a> | <a href="{STATIC_PATH}">Client rendered</a></div></nav>
  {body}
</body>
</html>"#,
        title = encode_text(title),
    )
}

// ── Pages ───────────────────────────────────────────────────

pub fn index() -> String {
    layout(
        "Home",
        r#"<main class="main">
  <div class="title">Astronomy Picture of the Day</div>
  <p>The same record, rendered two ways.</p>
  <ul>
    <li><a href="/ssr">Server-side rendered</a>: fetched and inlined before the page is sent.</li>
    <li><a href="/static">Client rendered</a>: the browser fetches the record after the page loads.</li>
  </ul>
</main>"#,
        "",
    )
}

/// The server-rendered page. "Refresh" re-requests the page, re-running the pipeline.
pub fn ssr(record: &Record) -> String {
    layout(
        record.title(),
        &format!(
            r#"<main class="main">
  <div class="mode">SERVER-SIDE RENDERED</div>
  <form method="get" action="{SSR_PATH}"><button type="submit">Refresh</button></form>
  {content}
</main>"#,
            content = view::render_record(record),
        ),
        "",
    )
}

/// The client-rendered shell: the initial view state plus the script that drives it.
pub fn client_shell(view: &ClientView) -> String {
    layout(
        "Client rendered",
        &format!(
            r#"<main class="main">
  <div class="mode">CLIENT RENDERED</div>
  <button id="apod-reload" type="button">Reload</button>
  <div id="apod-content" data-source="{STATIC_PATH}">{content}</div>
</main>"#,
            content = view.render(),
        ),
        &assets::script_tag(),
    )
}

/// Rendered in place of a page when the pipeline fails.
pub fn error_boundary(failure: &FetchFailure) -> HtmlResponse {
    let body = format!(
        r#"<main class="main">
  <div class="mode">SOMETHING WENT WRONG</div>
  <div class="error">The picture of the day could not be loaded.</div>
  <pre class="error">{detail}</pre>
  <a href="">Try again</a>
</main>"#,
        detail = encode_text(&failure.to_string()),
    );

    html(layout("Error", &body, ""))
        .with_status(StatusCode::BAD_GATEWAY)
        .no_store()
}
