// ./src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// The one way the fetch-and-inline pipeline fails.
///
/// Variants only say where the failure happened; callers treat them alike and
/// surface them to the rendering boundary without retrying.
#[derive(Debug, thiserror::Error)]
pub enum FetchFailure {
    /// The record endpoint answered with a non-2xx status.
    #[error("{url} responded with {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("the feed returned no records")]
    EmptyFeed,

    #[error("record already carries an inlined image")]
    AlreadyInlined,
}

impl FetchFailure {
    /// This error followed by each of its causes, joined by `": "`.
    pub fn chain(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            out.push_str(": ");
            out.push_str(&cause.to_string());
            source = cause.source();
        }
        out
    }
}

/// Drops the request URL: the API key rides in the record request's query
/// string and must never reach logs or error pages.
impl From<reqwest::Error> for FetchFailure {
    fn from(err: reqwest::Error) -> Self {
        FetchFailure::Transport(err.without_url())
    }
}

/// JSON callers get `{"error": "..."}` with `502 Bad Gateway`.
/// HTML callers get [`crate::pages::error_boundary`] instead.
impl IntoResponse for FetchFailure {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_GATEWAY,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
