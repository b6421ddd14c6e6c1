//! Markup parsing with an ordered list of fallback strategies.

use scraper::Html;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// A named way of turning markup into a tree.
#[derive(Clone, Copy)]
pub struct ParserStrategy {
    name: &'static str,
    parse: fn(&str) -> Html,
}

impl ParserStrategy {
    /// Full document parse with implied `<html>`/`<head>`/`<body>`.
    pub const DOCUMENT: Self = Self::new("document", Html::parse_document);
    /// Fragment parse in a `<body>` context; tolerates markup the document
    /// tree builder chokes on.
    pub const FRAGMENT: Self = Self::new("fragment", Html::parse_fragment);

    pub const fn new(name: &'static str, parse: fn(&str) -> Html) -> Self {
        Self { name, parse }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Parse `markup`, turning a panic inside the parser into `None`.
    pub fn try_parse(&self, markup: &str) -> Option<Html> {
        let parse = self.parse;
        panic::catch_unwind(AssertUnwindSafe(|| parse(markup))).ok()
    }
}

impl fmt::Debug for ParserStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ParserStrategy").field(&self.name).finish()
    }
}

impl PartialEq for ParserStrategy {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ParserStrategy {}

/// Strategies tried by [`parse_markup`], in order.
pub const DEFAULT_STRATEGIES: &[ParserStrategy] = &[ParserStrategy::DOCUMENT, ParserStrategy::FRAGMENT];

/// Try each strategy in order and return the first tree produced.
pub fn parse_with(strategies: &[ParserStrategy], markup: &str) -> Option<(ParserStrategy, Html)> {
    strategies.iter().find_map(|&strategy| match strategy.try_parse(markup) {
        Some(html) => Some((strategy, html)),
        None => {
            tracing::warn!(strategy = strategy.name(), "parser failed, trying next strategy");
            None
        }
    })
}

/// Parse with [`DEFAULT_STRATEGIES`].
pub fn parse_markup(markup: &str) -> Option<Html> {
    parse_with(DEFAULT_STRATEGIES, markup).map(|(_, html)| html)
}
