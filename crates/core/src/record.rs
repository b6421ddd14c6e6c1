//! The structured metadata record returned for one page.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Social-preview metadata resolved from a single page.
///
/// Every field except `url` is present only when one of its source locations held a
/// non-empty value. `keywords`, when present, is never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MetadataRecord {
    /// The requested URL, echoed back as given.
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Absolute preview image URL.
    pub image: Option<String>,
    pub site_name: Option<String>,
    /// Open Graph object type (`website`, `article`, ...).
    #[serde(rename = "type")]
    pub page_type: Option<String>,
    pub locale: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub published_time: Option<String>,
    pub modified_time: Option<String>,
    /// Absolute video URL.
    pub video_url: Option<String>,
    /// Absolute audio URL.
    pub audio_url: Option<String>,
    pub duration: Option<String>,
    pub twitter_handle: Option<String>,
    pub twitter_card: Option<String>,
    /// Absolute canonical URL.
    pub canonical_url: Option<String>,
    /// Absolute favicon URL.
    pub favicon: Option<String>,
    pub theme_color: Option<String>,
    pub keywords: Option<Vec<String>>,
}

impl MetadataRecord {
    /// Create a record for `url` with no resolved fields.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), ..Default::default() }
    }

    /// Whether nothing beyond `url` was resolved.
    pub fn is_bare(&self) -> bool {
        *self == Self::new(self.url.clone())
    }
}
