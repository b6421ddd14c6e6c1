//! Tag resolution: first non-empty value across an ordered list of sources.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use super::sources::{SelectorKind, Source};

static META: LazyLock<Selector> = LazyLock::new(|| Selector::parse("meta").expect("invalid selector"));
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("link[rel]").expect("invalid selector"));

/// Find the value of the first element matching `kind` and `key` whose value is
/// non-empty after trimming.
///
/// Attribute values are compared ASCII case-insensitively. For `Rel` the key has to
/// equal one of the whitespace-separated rel tokens, so `"icon"` also matches
/// `rel="shortcut icon"`. A `Tag` lookup reads only the first matching element, so
/// an empty `<title>` is not replaced by one nested in inline SVG.
pub fn find_meta_content(document: &Html, kind: SelectorKind, key: &str) -> Option<String> {
    match kind {
        SelectorKind::Property | SelectorKind::Name | SelectorKind::Rel => {
            let selector_attr = kind.selector_attribute()?;
            let value_attr = kind.value_attribute()?;
            let candidates = if kind == SelectorKind::Rel { &*LINK } else { &*META };

            document
                .select(candidates)
                .filter(|el| attribute_matches(el, selector_attr, key, kind == SelectorKind::Rel))
                .find_map(|el| non_empty(el.value().attr(value_attr)?))
        }
        SelectorKind::Tag => {
            let selector = Selector::parse(key).ok()?;
            let element = document.select(&selector).next()?;
            non_empty(&element.text().collect::<String>())
        }
    }
}

/// Resolve one logical field: try each source in order, first hit wins.
pub fn resolve(document: &Html, sources: &[Source]) -> Option<String> {
    sources.iter().find_map(|source| {
        let value = find_meta_content(document, source.kind, source.key)?;
        tracing::trace!(tag = source.tag_name(), kind = ?source.kind, key = source.key, "source resolved");
        Some(value)
    })
}

fn attribute_matches(element: &ElementRef<'_>, attr: &str, key: &str, tokenized: bool) -> bool {
    let Some(value) = element.value().attr(attr) else {
        return false;
    };

    if tokenized {
        value.split_ascii_whitespace().any(|token| token.eq_ignore_ascii_case(key))
    } else {
        value.trim().eq_ignore_ascii_case(key)
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}
