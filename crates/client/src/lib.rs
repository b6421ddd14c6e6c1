//! Client code for unfurl.
//!
//! This crate provides the fetch pipeline, metadata extraction and the
//! [`Unfurler`] entry point that composes them.

pub mod extract;
pub mod fetch;
pub mod unfurl;

pub use extract::{
    DEFAULT_STRATEGIES, Field, ParserStrategy, SelectorKind, Source, assemble, assemble_document, assemble_with,
    find_meta_content, normalize_url, parse_markup, parse_with, resolve, split_keywords,
};

pub use fetch::{FetchClient, FetchConfig, FetchedDocument, Fetcher, UrlError, parse_page_url};
pub use unfurl::Unfurler;
