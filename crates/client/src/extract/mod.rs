//! Metadata assembly from page markup.
//!
//! ### Resolution
//! - Each field has a static, ordered list of sources (see [`sources`]).
//! - The first source yielding a non-empty trimmed value wins; nothing is merged.
//! - Open Graph beats Twitter Card beats plain HTML.
//!
//! ### Post-processing
//! - URL-valued fields are made absolute against the page's effective URL; a
//!   malformed reference drops only that field.
//! - `keywords` is split on commas and is absent when no entry survives.
//!
//! Assembly performs no I/O and never fails.

pub mod normalize;
pub mod parse;
pub mod resolve;
pub mod sources;

pub use normalize::{normalize_url, split_keywords};
pub use parse::{DEFAULT_STRATEGIES, ParserStrategy, parse_markup, parse_with};
pub use resolve::{find_meta_content, resolve};
pub use sources::{Field, SelectorKind, Source};

use scraper::Html;
use unfurl_core::MetadataRecord;
use url::Url;

/// Parse `markup` and assemble a record, using `base_url` as both the echoed URL and
/// the base for relative references.
///
/// If no parser strategy produces a tree the record is returned bare.
pub fn assemble(markup: &str, base_url: &Url) -> MetadataRecord {
    assemble_with(DEFAULT_STRATEGIES, markup, base_url)
}

/// [`assemble`] with an explicit, ordered list of parser strategies.
pub fn assemble_with(strategies: &[ParserStrategy], markup: &str, base_url: &Url) -> MetadataRecord {
    match parse_with(strategies, markup) {
        Some((_, document)) => assemble_document(&document, base_url),
        None => {
            tracing::warn!(url = %base_url, "no parser strategy produced a tree");
            MetadataRecord::new(base_url.as_str())
        }
    }
}

/// Assemble a record from an already parsed document.
pub fn assemble_document(document: &Html, base_url: &Url) -> MetadataRecord {
    let text = |field: Field| resolve(document, field.sources());
    let link = |field: Field| {
        let raw = text(field)?;
        let absolute = normalize_url(&raw, base_url);
        if absolute.is_none() {
            tracing::debug!(field = field.name(), raw = %raw, "discarding malformed URL value");
        }
        absolute
    };

    let record = MetadataRecord {
        url: base_url.to_string(),
        title: text(Field::Title),
        description: text(Field::Description),
        image: link(Field::Image),
        site_name: text(Field::SiteName),
        page_type: text(Field::Type),
        locale: text(Field::Locale),
        author: text(Field::Author),
        publisher: text(Field::Publisher),
        published_time: text(Field::PublishedTime),
        modified_time: text(Field::ModifiedTime),
        video_url: link(Field::VideoUrl),
        audio_url: link(Field::AudioUrl),
        duration: text(Field::Duration),
        twitter_handle: text(Field::TwitterHandle),
        twitter_card: text(Field::TwitterCard),
        canonical_url: link(Field::CanonicalUrl),
        favicon: link(Field::Favicon),
        theme_color: text(Field::ThemeColor),
        keywords: text(Field::Keywords).and_then(|raw| split_keywords(&raw)),
    };

    tracing::debug!(
        url = %base_url,
        has_title = record.title.is_some(),
        has_description = record.description.is_some(),
        has_image = record.image.is_some(),
        "assembled metadata"
    );

    record
}
