// ./src/inliner.rs

use crate::{data_url::DataUrl, error::FetchFailure};
use reqwest::Client;
use tracing::{debug, warn};

/// Downloads an image and re-encodes it as a `data:image/png;base64,` URL.
///
/// Unlike [`RecordFetcher`](crate::fetcher::RecordFetcher) this does not
/// reject non-2xx responses: whatever body comes back is encoded. A
/// non-success status is only logged.
#[derive(Clone)]
pub struct ImageInliner {
    client: Client,
}

impl ImageInliner {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn inline(&self, url: &str) -> Result<DataUrl, FetchFailure> {
        debug!(%url, "inlining image");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                %url,
                %status,
                "image host returned a non-success status, encoding the body anyway"
            );
        }

        let bytes = response.bytes().await?;
        debug!(%url, bytes = bytes.len(), "image inlined");

        Ok(DataUrl::from_bytes(&bytes))
    }
}
