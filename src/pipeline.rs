// ./src/pipeline.rs

use crate::{
    config::ApodConfig,
    error::FetchFailure,
    fetcher::{CacheMode, RecordFetcher},
    inliner::ImageInliner,
    record::Record,
};
use reqwest::Client;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub cache: CacheMode,
    pub inline_image: bool,
}

impl LoadOptions {
    /// Server-rendered pages inline the image before rendering.
    pub fn server_rendered(cache: CacheMode) -> Self {
        Self {
            cache,
            inline_image: true,
        }
    }

    /// Client-rendered pages hand the remote URL to the browser.
    pub fn client_rendered(cache: CacheMode) -> Self {
        Self {
            cache,
            inline_image: false,
        }
    }
}

/// Record fetch followed by the optional image inline.
///
/// The two requests are sequential: the inliner needs the fetched record's
/// `url`, and never runs when the fetch fails.
#[derive(Clone)]
pub struct Pipeline {
    fetcher: RecordFetcher,
    inliner: ImageInliner,
}

impl Pipeline {
    pub fn new(fetcher: RecordFetcher, inliner: ImageInliner) -> Self {
        Self { fetcher, inliner }
    }

    /// Both stages share one connection pool.
    pub fn from_config(config: &ApodConfig) -> Self {
        let client = Client::new();
        Self::new(
            RecordFetcher::new(config, client.clone()),
            ImageInliner::new(client),
        )
    }

    pub async fn load(&self, opts: LoadOptions) -> Result<Record, FetchFailure> {
        let record = self.fetcher.fetch(opts.cache).await?;

        if !opts.inline_image {
            return Ok(record);
        }

        // A video's url is an embeddable player, not image bytes.
        if record.is_video() {
            debug!(url = record.url(), "video record, skipping inline");
            return Ok(record);
        }

        let image = self.inliner.inline(record.url()).await?;
        record.with_image(image)
    }
}
