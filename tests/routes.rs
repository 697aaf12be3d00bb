// tests/routes.rs
//
// Both rendering modes through the real router, with the upstream mocked.

use apodview::{
    assets,
    server::{router, AppState},
    ApodConfig,
};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Response,
};
use mockito::{Matcher, Server, ServerGuard};
use tower::ServiceExt;

// ── Helpers ─────────────────────────────────────────────────

const API_PATH: &str = "/planetary/apod";

fn app(server: &ServerGuard) -> axum::Router {
    let config = ApodConfig::new("TEST_KEY")
        .unwrap()
        .with_endpoint(&format!("{}{API_PATH}", server.url()))
        .unwrap();
    router(AppState::new(&config))
}

async fn get(app: axum::Router, uri: &str, headers: &[(&str, &str)]) -> Response {
    let mut builder = Request::get(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn mock_feed(server: &mut ServerGuard) -> mockito::Mock {
    let body = serde_json::json!([{
        "title": "Pillars <of> Creation",
        "explanation": "Gas & dust.",
        "url": format!("{}/pillars.jpg", server.url()),
    }])
    .to_string();
    server
        .mock("GET", API_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(body)
        .create_async()
        .await
}

// ════════════════════════════════════════════════════════════
// Server-side rendered
// ════════════════════════════════════════════════════════════

#[tokio::test]
async fn ssr_page_renders_record_with_inlined_image() {
    let mut server = Server::new_async().await;
    let _api = mock_feed(&mut server).await;
    let image = server
        .mock("GET", "/pillars.jpg")
        .with_status(200)
        .with_body([0xFF_u8, 0xD8, 0xFF])
        .create_async()
        .await;

    let response = get(app(&server), "/ssr", &[("accept", "text/html")]).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["cache-control"], "no-store");

    let body = body_string(response).await;
    assert!(body.contains("SERVER-SIDE RENDERED"));
    assert!(body.contains("Pillars &lt;of&gt; Creation"));
    assert!(body.contains("Gas &amp; dust."));
    assert!(body.contains(r#"src="data:image/png;base64,/9j/""#));
    image.assert_async().await;
}

#[tokio::test]
async fn ssr_json_returns_the_inlined_record() {
    let mut server = Server::new_async().await;
    let _api = mock_feed(&mut server).await;
    let _image = server
        .mock("GET", "/pillars.jpg")
        .with_status(200)
        .with_body([0xFF_u8, 0xD8, 0xFF])
        .create_async()
        .await;

    let response = get(app(&server), "/ssr", &[("accept", "application/json")]).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["apod-cache"], "bypass");

    let payload: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(payload["title"], "Pillars <of> Creation");
    assert_eq!(payload["image"], "data:image/png;base64,/9j/");
}

#[tokio::test]
async fn ssr_upstream_failure_renders_error_boundary() {
    let mut server = Server::new_async().await;
    let _api = server
        .mock("GET", API_PATH)
        .match_query(Matcher::Any)
        .with_status(429)
        .create_async()
        .await;

    let response = get(app(&server), "/ssr", &[("accept", "text/html")]).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = body_string(response).await;
    assert!(body.contains("could not be loaded"));
    assert!(body.contains("429"));
    assert!(!body.contains("TEST_KEY"));
}

#[tokio::test]
async fn ssr_forwards_cache_choice_upstream() {
    let mut server = Server::new_async().await;
    let api = server
        .mock("GET", API_PATH)
        .match_query(Matcher::Any)
        .match_header("cache-control", Matcher::Missing)
        .with_status(200)
        .with_body(r#"[{"title":"T","explanation":"E","url":"http://127.0.0.1:1/y.jpg"}]"#)
        .create_async()
        .await;

    // The image host is unreachable, so the page fails, but only after the
    // record request went out with the requested cache mode.
    let response = get(
        app(&server),
        "/ssr",
        &[("accept", "application/json"), ("apod-cache", "default")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    api.assert_async().await;
}

// ════════════════════════════════════════════════════════════
// Client rendered
// ════════════════════════════════════════════════════════════

#[tokio::test]
async fn static_shell_is_loading_and_makes_no_upstream_call() {
    let mut server = Server::new_async().await;
    let api = server
        .mock("GET", API_PATH)
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let response = get(app(&server), "/static", &[("accept", "text/html")]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("CLIENT RENDERED"));
    assert!(body.contains("Loading..."));
    assert!(body.contains(r#"id="apod-reload""#));
    assert!(body.contains(&assets::script_tag()));
    api.assert_async().await;
}

#[tokio::test]
async fn static_json_returns_record_without_image() {
    let mut server = Server::new_async().await;
    let _api = mock_feed(&mut server).await;
    let image = server
        .mock("GET", "/pillars.jpg")
        .expect(0)
        .create_async()
        .await;

    let response = get(
        app(&server),
        "/static",
        &[
            ("accept", "application/json"),
            ("apod-client", "1"),
            ("apod-cache", "default"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["apod-cache"], "default");

    let payload: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(payload["title"], "Pillars <of> Creation");
    assert!(payload.get("image").is_none());
    image.assert_async().await;
}

#[tokio::test]
async fn static_json_failure_is_a_json_error() {
    let mut server = Server::new_async().await;
    let _api = server
        .mock("GET", API_PATH)
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let response = get(
        app(&server),
        "/static",
        &[("accept", "application/json"), ("apod-client", "1")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let payload: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(payload["error"].as_str().unwrap().contains("503"));
}

// ════════════════════════════════════════════════════════════
// Misc
// ════════════════════════════════════════════════════════════

#[tokio::test]
async fn invalid_cache_header_is_bad_request() {
    let server = Server::new_async().await;
    let response = get(app(&server), "/ssr", &[("apod-cache", "sometimes")]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn index_and_assets_are_served() {
    let server = Server::new_async().await;

    let response = get(app(&server), "/", &[]).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains(r#"href="/static""#));

    let response = get(app(&server), assets::CLIENT_JS_PATH, &[]).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, assets::CLIENT_JS);

    let response = get(app(&server), "/healthz", &[]).await;
    assert_eq!(body_string(response).await, "ok");
}
