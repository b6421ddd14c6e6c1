//! Page URL validation.
//!
//! The pipeline only accepts absolute http(s) URLs. Callers run input through
//! [`parse_page_url`] before handing it to [`crate::Unfurler::extract`].

/// Error type for page URL validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Parse and validate a page URL.
///
/// Validation steps:
/// 1. Trim leading/trailing whitespace
/// 2. Require an absolute URL (no scheme defaulting)
/// 3. Require an `http` or `https` scheme (the URL parser already rejects
///    these without a host)
pub fn parse_page_url(input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let url = parse_page_url("https://example.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn test_parse_http_allowed() {
        let url = parse_page_url("http://example.com/page").unwrap();
        assert_eq!(url.scheme(), "http");
    }

    #[test]
    fn test_parse_keeps_query_and_fragment() {
        let url = parse_page_url("https://example.com/path?a=1&b=2#section").unwrap();
        assert_eq!(url.path(), "/path");
        assert_eq!(url.query(), Some("a=1&b=2"));
        assert_eq!(url.fragment(), Some("section"));
    }

    #[test]
    fn test_parse_trim_whitespace() {
        let url = parse_page_url("  https://example.com  ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn test_parse_relative_rejected() {
        let result = parse_page_url("example.com/page");
        assert!(matches!(result, Err(UrlError::InvalidUrl(_))));
    }

    #[test]
    fn test_parse_unsupported_scheme() {
        let result = parse_page_url("file:///etc/passwd");
        assert!(matches!(result, Err(UrlError::UnsupportedScheme(s)) if s == "file"));

        let result = parse_page_url("ftp://example.com/file");
        assert!(matches!(result, Err(UrlError::UnsupportedScheme(_))));
    }

    #[test]
    fn test_parse_missing_host() {
        let result = parse_page_url("https://");
        assert!(matches!(result, Err(UrlError::InvalidUrl(_))));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_page_url(""), Err(UrlError::Empty));
        assert_eq!(parse_page_url("   "), Err(UrlError::Empty));
    }
}
