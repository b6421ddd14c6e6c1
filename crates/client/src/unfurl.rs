//! Pipeline entry point: fetch, parse, assemble.

use unfurl_core::{Error, MetadataRecord};
use url::Url;

use crate::extract::assemble;
use crate::fetch::{FetchClient, FetchConfig, Fetcher};

/// Extracts a [`MetadataRecord`] from a page URL.
///
/// Holds no per-request state; one instance can serve concurrent calls.
pub struct Unfurler<F = FetchClient> {
    fetcher: F,
}

impl Unfurler<FetchClient> {
    /// Create an unfurler backed by an HTTP fetch client.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        Ok(Self { fetcher: FetchClient::new(config)? })
    }
}

impl<F: Fetcher> Unfurler<F> {
    /// Create an unfurler over any [`Fetcher`].
    pub fn with_fetcher(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Fetch `url` and extract its metadata.
    ///
    /// Relative references resolve against the post-redirect URL, but the returned
    /// record's `url` is always the one passed in. Fetch failures are returned as-is;
    /// extraction itself cannot fail.
    pub async fn extract(&self, url: &Url) -> Result<MetadataRecord, Error> {
        let document = self.fetcher.fetch(url).await?;

        let mut record = assemble(&document.markup, &document.final_url);
        record.url = url.to_string();

        tracing::info!(
            url = %url,
            final_url = %document.final_url,
            fetch_ms = document.fetch_ms,
            bare = record.is_bare(),
            "unfurled"
        );

        Ok(record)
    }
}
