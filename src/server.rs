// ./src/server.rs
//
// Routes, handlers and the serve loop.

use crate::{
    assets,
    config::ApodConfig,
    error::FetchFailure,
    extract::{RenderMode, RenderRequest},
    fetcher::CacheMode,
    headers::ApodCache,
    html, json,
    pages::{self, SSR_PATH, STATIC_PATH},
    pipeline::{LoadOptions, Pipeline},
    respond,
    response::ResponseExt,
    view::ClientView,
};
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tracing::{error, info};

/// Shared by every handler. Immutable; the `reqwest::Client` inside the
/// pipeline is reference counted, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
    pub cache: CacheMode,
}

impl AppState {
    pub fn new(config: &ApodConfig) -> Self {
        Self {
            pipeline: Pipeline::from_config(config),
            cache: config.cache,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route(SSR_PATH, get(server_rendered))
        .route(STATIC_PATH, get(client_rendered))
        .route(assets::CLIENT_JS_PATH, get(assets::serve_client_js))
        .route("/healthz", get(|| async { "ok" }))
        .with_state(state)
}

/// Binds `config.bind` and serves until Ctrl-C or SIGTERM.
pub async fn serve(config: ApodConfig) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.bind).await?;
    info!(addr = %listener.local_addr()?, endpoint = %config.endpoint, "apodview listening");

    axum::serve(listener, router(AppState::new(&config)))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

// ── Handlers ────────────────────────────────────────────────

async fn index(req: RenderRequest) -> Result<Response, Response> {
    respond!(req, {
        html => html(pages::index()).no_store(),
    })
}

/// Fetches and inlines on every request, then renders the whole page.
async fn server_rendered(
    State(state): State<AppState>,
    req: RenderRequest,
) -> Result<Response, Response> {
    let cache = req.cache_or(state.cache);

    match state.pipeline.load(LoadOptions::server_rendered(cache)).await {
        Ok(record) => respond!(req, {
            html => html(pages::ssr(&record))
                .no_store()
                .with_header(ApodCache::NAME, cache.as_str()),
            json => json(record)
                .no_store()
                .with_header(ApodCache::NAME, cache.as_str()),
        }),
        Err(failure) => boundary(&req, failure),
    }
}

/// The page itself is a loading shell; the script asks this same route for JSON.
async fn client_rendered(
    State(state): State<AppState>,
    req: RenderRequest,
) -> Result<Response, Response> {
    match req.preferred_mode() {
        RenderMode::Html => Ok(html(pages::client_shell(&ClientView::new()))
            .no_store()
            .into_response()),
        RenderMode::Json => {
            let cache = req.cache_or(state.cache);
            match state.pipeline.load(LoadOptions::client_rendered(cache)).await {
                Ok(record) => Ok(json(record)
                    .no_store()
                    .with_header(ApodCache::NAME, cache.as_str())
                    .into_response()),
                Err(failure) => boundary(&req, failure),
            }
        }
    }
}

fn boundary(req: &RenderRequest, failure: FetchFailure) -> Result<Response, Response> {
    error!(error = %failure.chain(), "failed to load the picture of the day");
    respond!(req, {
        html => pages::error_boundary(&failure),
        json => failure,
    })
}

// ── Shutdown ────────────────────────────────────────────────

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, draining connections");
}
