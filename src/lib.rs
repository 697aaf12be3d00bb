// ./src/lib.rs

pub mod assets;
pub mod config;
pub mod data_url;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod headers;
pub mod inliner;
pub mod macros;
pub mod pages;
pub mod pipeline;
pub mod record;
pub mod response;
pub mod server;
pub mod view;

// Re-export the core API so callers can just `use apodview::*`
pub use config::{ApodConfig, ConfigError};
pub use data_url::DataUrl;
pub use error::FetchFailure;
pub use extract::RenderRequest;
pub use fetcher::{CacheMode, RecordFetcher};
pub use inliner::ImageInliner;
pub use pipeline::{LoadOptions, Pipeline};
pub use record::{MediaType, Record};
pub use response::{html, json, ResponseExt};
pub use view::{ClientView, ViewEvent, ViewState};
// Re-export Axum primitives they might need for convenience
pub use axum;
pub use axum::http::StatusCode;
pub use axum::response::Response;
