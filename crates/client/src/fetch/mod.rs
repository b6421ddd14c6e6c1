//! HTTP fetch pipeline with size and content-type gates.
//!
//! ### Safety Gates (applied in order)
//! - Whole-request timeout (default: 10s), no retries
//! - Redirects followed up to the transport default (10); the final URL is kept
//! - Any 4xx/5xx status fails with the numeric code
//! - Declared `Content-Length` above the cap (default: 5MB) fails before the body is read
//! - Declared media type must be HTML-like (`text/html`, `application/xhtml+xml`)
//!
//! The body is then streamed with the same cap, so a server that omits or
//! understates `Content-Length` is still cut off.

pub mod url;

use async_trait::async_trait;
use bytes::BytesMut;
use encoding_rs::{Encoding, UTF_8};
use reqwest::{Client, Response, StatusCode, Url, header};
use std::time::{Duration, Instant};

pub use self::url::{UrlError, parse_page_url};

use unfurl_core::{AppConfig, Error};

/// Accept header sent with every request.
const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "Mozilla/5.0 (compatible; unfurl/0.1)")
    pub user_agent: String,

    /// Maximum response size in bytes (default: 5MB)
    pub max_content_length: u64,

    /// Request timeout (default: 10s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 10)
    pub max_redirects: usize,

    /// Accept-Language header value (default: "en-US,en;q=0.5")
    pub accept_language: String,

    /// Media type prefixes accepted as HTML
    pub accepted_media_types: Vec<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            max_content_length: config.max_content_length,
            timeout: config.timeout(),
            max_redirects: config.max_redirects,
            accept_language: config.accept_language.clone(),
            accepted_media_types: config.accepted_media_types.clone(),
        }
    }
}

/// A successfully fetched HTML document.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    /// The URL originally requested
    pub requested_url: Url,
    /// The final URL after redirects; the base for relative references
    pub final_url: Url,
    /// HTTP status code
    pub status: StatusCode,
    /// Declared Content-Type header
    pub content_type: String,
    /// Decoded markup
    pub markup: String,
    /// Time taken to fetch in milliseconds
    pub fetch_ms: u64,
}

/// Something that can turn a page URL into a fetched document.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url`, applying every safety gate.
    async fn fetch(&self, url: &Url) -> Result<FetchedDocument, Error>;
}

/// HTTP fetch client with safety checks.
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::ClientInit(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Fetch a URL, returning the decoded markup and its effective URL.
    ///
    /// Every failure is one distinct [`Error`] variant; nothing is retried.
    pub async fn fetch(&self, url: &Url) -> Result<FetchedDocument, Error> {
        let start = Instant::now();

        let response = self
            .http
            .get(url.clone())
            .header(header::ACCEPT, ACCEPT_HTML)
            .header(header::ACCEPT_LANGUAGE, &self.config.accept_language)
            .send()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            tracing::warn!(url = %url, status = status.as_u16(), "upstream returned error status");
            return Err(Error::UpstreamStatus(status.as_u16()));
        }

        let limit = self.config.max_content_length;
        if let Some(declared) = response.content_length()
            && declared > limit
        {
            tracing::warn!(url = %url, declared, limit, "declared content length exceeds cap");
            return Err(Error::ContentTooLarge { size: declared, limit });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        if !self.is_html(&content_type) {
            tracing::warn!(url = %url, content_type = %content_type, "refusing non-HTML response");
            let declared = if content_type.is_empty() { "(none)".to_string() } else { content_type };
            return Err(Error::UnsupportedContentType(declared));
        }

        let final_url = response.url().clone();
        let body = self.read_capped(url, response).await?;
        let markup = decode_markup(&body, &content_type);
        let fetch_ms = start.elapsed().as_millis() as u64;

        tracing::debug!(url = %url, final_url = %final_url, fetch_ms, bytes = body.len(), "fetched page");

        Ok(FetchedDocument { requested_url: url.clone(), final_url, status, content_type, markup, fetch_ms })
    }

    /// Whether a declared content type names an accepted HTML-like media type.
    pub fn is_html(&self, content_type: &str) -> bool {
        let essence = media_type_essence(content_type);
        !essence.is_empty()
            && self
                .config
                .accepted_media_types
                .iter()
                .any(|accepted| essence.starts_with(&accepted.trim().to_ascii_lowercase()))
    }

    async fn read_capped(&self, url: &Url, mut response: Response) -> Result<BytesMut, Error> {
        let limit = self.config.max_content_length;
        let mut body = BytesMut::new();

        while let Some(chunk) = response.chunk().await.map_err(|e| self.transport_error(url, e))? {
            let size = (body.len() + chunk.len()) as u64;
            if size > limit {
                tracing::warn!(url = %url, size, limit, "streamed body exceeds cap");
                return Err(Error::ContentTooLarge { size, limit });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body)
    }

    fn transport_error(&self, url: &Url, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            tracing::warn!(url = %url, timeout_ms = self.config.timeout.as_millis() as u64, "fetch timed out");
            Error::Timeout(self.config.timeout)
        } else {
            tracing::warn!(url = %url, error = %err, "transport failure");
            Error::ConnectionFailure(describe_transport_error(&err))
        }
    }
}

#[async_trait]
impl Fetcher for FetchClient {
    async fn fetch(&self, url: &Url) -> Result<FetchedDocument, Error> {
        FetchClient::fetch(self, url).await
    }
}

/// Lowercased `type/subtype` with parameters stripped.
fn media_type_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Value of the `charset` parameter, if any.
fn charset_param(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    })
}

/// Decode body bytes using the declared charset, falling back to UTF-8.
///
/// A byte-order mark overrides the declared charset. Malformed sequences become U+FFFD.
fn decode_markup(body: &[u8], content_type: &str) -> String {
    let encoding = charset_param(content_type)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);
    let (text, _, _) = encoding.decode(body);
    text.into_owned()
}

/// Walk the error source chain to the innermost cause (e.g. "connection refused").
fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_redirect() {
        return "too many redirects".to_string();
    }

    let mut source: &dyn std::error::Error = err;
    while let Some(next) = source.source() {
        source = next;
    }
    source.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    use httpmock::prelude::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const PAGE: &str = r#"<html><head><title>Hello</title></head><body>hi</body></html>"#;

    fn client_with(config: FetchConfig) -> FetchClient {
        FetchClient::new(config).expect("client should build")
    }

    fn page_url(server: &MockServer, path: &str) -> Url {
        Url::parse(&server.url(path)).unwrap()
    }

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.user_agent, "Mozilla/5.0 (compatible; unfurl/0.1)");
        assert_eq!(config.max_content_length, 5 * 1024 * 1024);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_redirects, 10);
        assert_eq!(config.accept_language, "en-US,en;q=0.5");
    }

    #[test]
    fn test_fetch_config_from_app_config() {
        let app = AppConfig { timeout_secs: 3, max_content_length: 1024, ..Default::default() };
        let config = FetchConfig::from(&app);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.max_content_length, 1024);
    }

    #[test]
    fn test_is_html() {
        let client = client_with(FetchConfig::default());
        assert!(client.is_html("text/html"));
        assert!(client.is_html("text/html; charset=utf-8"));
        assert!(client.is_html("TEXT/HTML;charset=ISO-8859-1"));
        assert!(client.is_html("application/xhtml+xml"));
        assert!(!client.is_html("application/pdf"));
        assert!(!client.is_html("application/json"));
        assert!(!client.is_html("text/plain"));
        assert!(!client.is_html(""));
    }

    #[test]
    fn test_charset_param() {
        assert_eq!(charset_param("text/html; charset=utf-8"), Some("utf-8"));
        assert_eq!(charset_param("text/html;CHARSET=\"windows-1252\""), Some("windows-1252"));
        assert_eq!(charset_param("text/html"), None);
    }

    #[test]
    fn test_decode_markup_with_declared_charset() {
        let body = b"<title>caf\xe9</title>";
        assert_eq!(decode_markup(body, "text/html; charset=iso-8859-1"), "<title>caf\u{e9}</title>");
    }

    #[test]
    fn test_decode_markup_bom_overrides_declared_charset() {
        let body = b"\xef\xbb\xbf<title>caf\xc3\xa9</title>";
        assert_eq!(decode_markup(body, "text/html; charset=iso-8859-1"), "<title>caf\u{e9}</title>");
    }

    #[test]
    fn test_decode_markup_defaults_to_utf8() {
        let body = "<title>caf\u{e9}</title>".as_bytes();
        assert_eq!(decode_markup(body, "text/html"), "<title>caf\u{e9}</title>");
        assert_eq!(decode_markup(body, "text/html; charset=bogus"), "<title>caf\u{e9}</title>");
    }

    #[tokio::test]
    async fn test_fetch_html_page() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/page")
                    .header("user-agent", "Mozilla/5.0 (compatible; unfurl/0.1)")
                    .header("accept-language", "en-US,en;q=0.5");
                then.status(200)
                    .header("content-type", "text/html; charset=utf-8")
                    .body(PAGE);
            })
            .await;

        let client = client_with(FetchConfig::default());
        let url = page_url(&server, "/page");
        let document = client.fetch(&url).await.expect("fetch should succeed");

        mock.assert_async().await;
        assert_eq!(document.requested_url, url);
        assert_eq!(document.final_url, url);
        assert_eq!(document.status, StatusCode::OK);
        assert_eq!(document.content_type, "text/html; charset=utf-8");
        assert_eq!(document.markup, PAGE);
    }

    #[tokio::test]
    async fn test_fetch_follows_redirects_to_final_url() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/old");
                then.status(301).header("location", server.url("/blog/new"));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/blog/new");
                then.status(200).header("content-type", "text/html").body(PAGE);
            })
            .await;

        let client = client_with(FetchConfig::default());
        let document = client.fetch(&page_url(&server, "/old")).await.unwrap();

        assert_eq!(document.requested_url.path(), "/old");
        assert_eq!(document.final_url.path(), "/blog/new");
    }

    #[tokio::test]
    async fn test_fetch_too_many_redirects() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/loop");
                then.status(302).header("location", server.url("/loop"));
            })
            .await;

        let client = client_with(FetchConfig { max_redirects: 2, ..Default::default() });
        let result = client.fetch(&page_url(&server, "/loop")).await;

        assert_eq!(result.unwrap_err(), Error::ConnectionFailure("too many redirects".into()));
    }

    #[tokio::test]
    async fn test_fetch_client_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing");
                then.status(404).header("content-type", "text/html").body("<h1>Not found</h1>");
            })
            .await;

        let client = client_with(FetchConfig::default());
        let result = client.fetch(&page_url(&server, "/missing")).await;

        assert_eq!(result.unwrap_err(), Error::UpstreamStatus(404));
    }

    #[tokio::test]
    async fn test_fetch_server_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/boom");
                then.status(503);
            })
            .await;

        let client = client_with(FetchConfig::default());
        let result = client.fetch(&page_url(&server, "/boom")).await;

        assert_eq!(result.unwrap_err(), Error::UpstreamStatus(503));
    }

    #[tokio::test]
    async fn test_fetch_declared_length_too_large() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/big");
                then.status(200).header("content-type", "text/html").body("x".repeat(4096));
            })
            .await;

        let client = client_with(FetchConfig { max_content_length: 1024, ..Default::default() });
        let result = client.fetch(&page_url(&server, "/big")).await;

        assert_eq!(result.unwrap_err(), Error::ContentTooLarge { size: 4096, limit: 1024 });
    }

    #[tokio::test]
    async fn test_fetch_size_checked_before_content_type() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/big.pdf");
                then.status(200).header("content-type", "application/pdf").body("x".repeat(4096));
            })
            .await;

        let client = client_with(FetchConfig { max_content_length: 1024, ..Default::default() });
        let result = client.fetch(&page_url(&server, "/big.pdf")).await;

        assert!(matches!(result, Err(Error::ContentTooLarge { .. })));
    }

    #[tokio::test]
    async fn test_fetch_streamed_body_too_large() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;

            let head = "HTTP/1.1 200 OK\r\ncontent-type: text/html\r\ntransfer-encoding: chunked\r\n\r\n";
            let _ = socket.write_all(head.as_bytes()).await;
            let chunk = format!("100\r\n{}\r\n", "a".repeat(256));
            for _ in 0..8 {
                if socket.write_all(chunk.as_bytes()).await.is_err() {
                    return;
                }
            }
            let _ = socket.write_all(b"0\r\n\r\n").await;
        });

        let client = client_with(FetchConfig { max_content_length: 600, ..Default::default() });
        let url = Url::parse(&format!("http://{addr}/chunked")).unwrap();
        let result = client.fetch(&url).await;

        assert!(matches!(result, Err(Error::ContentTooLarge { size, limit: 600 }) if size > 600));
    }

    #[tokio::test]
    async fn test_fetch_rejects_pdf() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/doc.pdf");
                then.status(200).header("content-type", "application/pdf").body("%PDF-1.7");
            })
            .await;

        let client = client_with(FetchConfig::default());
        let result = client.fetch(&page_url(&server, "/doc.pdf")).await;

        assert_eq!(result.unwrap_err(), Error::UnsupportedContentType("application/pdf".into()));
    }

    #[tokio::test]
    async fn test_fetch_rejects_missing_content_type() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/bare");
                then.status(200).body(PAGE);
            })
            .await;

        let client = client_with(FetchConfig::default());
        let result = client.fetch(&page_url(&server, "/bare")).await;

        assert!(matches!(result, Err(Error::UnsupportedContentType(_))));
    }

    #[tokio::test]
    async fn test_fetch_accepts_xhtml() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/page.xhtml");
                then.status(200).header("content-type", "application/xhtml+xml").body(PAGE);
            })
            .await;

        let client = client_with(FetchConfig::default());
        let document = client.fetch(&page_url(&server, "/page.xhtml")).await.unwrap();
        assert_eq!(document.markup, PAGE);
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/slow");
                then.status(200)
                    .header("content-type", "text/html")
                    .body(PAGE)
                    .delay(Duration::from_millis(1500));
            })
            .await;

        let timeout = Duration::from_millis(200);
        let client = client_with(FetchConfig { timeout, ..Default::default() });
        let result = client.fetch(&page_url(&server, "/slow")).await;

        assert_eq!(result.unwrap_err(), Error::Timeout(timeout));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_with(FetchConfig::default());
        let url = Url::parse(&format!("http://{addr}/")).unwrap();
        let result = client.fetch(&url).await;

        assert!(matches!(result, Err(Error::ConnectionFailure(_))));
    }
}
