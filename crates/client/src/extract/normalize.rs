//! Value post-processing: absolute URLs and keyword lists.

use url::Url;

/// Resolve a possibly relative reference against the page's effective URL.
///
/// Absolute references come back unchanged. Scheme-relative, path-relative,
/// query-only and fragment-only references follow standard URL joining. Tabs and
/// line breaks inside the value are stripped by the URL parser; any other control
/// character, or a reference the parser rejects, yields `None`, so one broken tag
/// only drops its own field.
pub fn normalize_url(raw: &str, base: &Url) -> Option<String> {
    let reference = raw.trim();

    if reference.is_empty() || reference.chars().any(is_rejected_control) {
        return None;
    }

    if let Ok(absolute) = Url::parse(reference) {
        if reference.contains(is_stripped_whitespace) {
            return Some(absolute.to_string());
        }
        return Some(reference.to_string());
    }

    match base.join(reference) {
        Ok(resolved) => Some(resolved.to_string()),
        Err(e) => {
            tracing::debug!(reference, base = %base, error = %e, "dropping unparseable URL reference");
            None
        }
    }
}

fn is_stripped_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
}

fn is_rejected_control(c: char) -> bool {
    c.is_control() && !is_stripped_whitespace(c)
}

/// Split a comma-separated keyword list, trimming entries and dropping empty ones.
///
/// Returns `None` rather than an empty list.
pub fn split_keywords(raw: &str) -> Option<Vec<String>> {
    let keywords: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect();

    if keywords.is_empty() { None } else { Some(keywords) }
}
