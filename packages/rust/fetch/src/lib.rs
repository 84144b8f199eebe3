//! Briefing document fetch and parse.
//!
//! Fetches the pre-generated briefing JSON from its configured URL and parses
//! it into a [`Briefing`]. The document may arrive as a bare object or as a
//! singleton array containing one. The [`cache`] module keeps the last
//! successfully fetched document on disk so a failed refresh can fall back to
//! the previous state.

pub mod cache;

use reqwest::Client;
use sha2::{Digest, Sha256};
use tracing::{debug, instrument};
use url::Url;

use daybrief_shared::{Briefing, DaybriefError, Result};

/// Default timeout in seconds for fetching the briefing document.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Maximum response size we consider valid (10 MB).
const MAX_RESPONSE_SIZE: u64 = 10 * 1024 * 1024;

/// User-Agent string for briefing requests.
const USER_AGENT: &str = concat!("daybrief/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Fetch options
// ---------------------------------------------------------------------------

/// Configuration for the briefing fetch.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Timeout for the HTTP request in seconds.
    pub timeout_secs: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

/// Fetch and parse the briefing document at `url`.
///
/// Non-success status, an oversized body, and transport failures are network
/// errors; an unparseable body is a parse error. No retries — the caller
/// decides whether to fall back to the cache.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_briefing(url: &Url, opts: &FetchOptions) -> Result<Briefing> {
    let client = build_client(opts)?;

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| DaybriefError::Network(format!("request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DaybriefError::Network(format!(
            "GET {url} returned {status}"
        )));
    }

    if let Some(len) = response.content_length() {
        if len > MAX_RESPONSE_SIZE {
            return Err(DaybriefError::Network(format!(
                "response too large: {len} bytes"
            )));
        }
    }

    let body = response
        .text()
        .await
        .map_err(|e| DaybriefError::Network(format!("reading body failed: {e}")))?;

    if body.len() as u64 > MAX_RESPONSE_SIZE {
        return Err(DaybriefError::Network(format!(
            "response too large: {} bytes",
            body.len()
        )));
    }

    debug!(len = body.len(), "briefing document fetched");

    parse_briefing(&body)
}

/// Parse a briefing document from JSON text.
///
/// Accepts either a bare object or a singleton array containing one; some
/// generators wrap their output in a one-element array.
pub fn parse_briefing(json: &str) -> Result<Briefing> {
    match serde_json::from_str::<Briefing>(json) {
        Ok(briefing) => Ok(briefing),
        Err(object_err) => match serde_json::from_str::<Vec<Briefing>>(json) {
            Ok(mut items) if !items.is_empty() => Ok(items.remove(0)),
            _ => Err(DaybriefError::parse(format!(
                "briefing document: {object_err}"
            ))),
        },
    }
}

/// SHA-256 hex digest of the summary text, used to detect whether a refresh
/// actually changed the document.
pub fn summary_digest(briefing: &Briefing) -> String {
    let mut hasher = Sha256::new();
    hasher.update(briefing.summary.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn build_client(opts: &FetchOptions) -> Result<Client> {
    Client::builder()
        .timeout(std::time::Duration::from_secs(opts.timeout_secs))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| DaybriefError::Network(format!("client build failed: {e}")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DOC: &str = r####"{
        "summary": "### MARKETS\nStocks rose 1%",
        "generated_at": "2025-11-14T06:30:00Z",
        "sources": [
            {"title": "A story", "url": "https://example.com/a", "score": 10, "comments": 2, "source": "hackernews"}
        ]
    }"####;

    #[test]
    fn parse_bare_object() {
        let briefing = parse_briefing(DOC).expect("parse");
        assert!(briefing.summary.contains("MARKETS"));
        assert_eq!(briefing.sources.len(), 1);
    }

    #[test]
    fn parse_singleton_array() {
        let wrapped = format!("[{DOC}]");
        let briefing = parse_briefing(&wrapped).expect("parse");
        assert!(briefing.summary.contains("MARKETS"));
    }

    #[test]
    fn parse_object_and_array_agree() {
        let from_object = parse_briefing(DOC).unwrap();
        let from_array = parse_briefing(&format!("[{DOC}]")).unwrap();
        assert_eq!(from_object.summary, from_array.summary);
        assert_eq!(from_object.generated_at, from_array.generated_at);
    }

    #[test]
    fn parse_empty_array_fails() {
        assert!(parse_briefing("[]").is_err());
    }

    #[test]
    fn parse_garbage_fails() {
        let err = parse_briefing("not json at all").unwrap_err();
        assert!(err.to_string().contains("parse error"));
    }

    #[test]
    fn parse_missing_sources_defaults_empty() {
        let json = r####"{"summary": "## TECH\nhi", "generated_at": "2025-11-14T06:30:00Z"}"####;
        let briefing = parse_briefing(json).expect("parse");
        assert!(briefing.sources.is_empty());
    }

    #[test]
    fn digest_is_stable_and_content_sensitive() {
        let a = parse_briefing(DOC).unwrap();
        let b = parse_briefing(DOC).unwrap();
        assert_eq!(summary_digest(&a), summary_digest(&b));

        let mut c = a.clone();
        c.summary.push_str("\nmore");
        assert_ne!(summary_digest(&a), summary_digest(&c));
    }

    #[tokio::test]
    async fn fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/briefing.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(DOC))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/briefing.json", server.uri())).unwrap();
        let briefing = fetch_briefing(&url, &FetchOptions::default())
            .await
            .expect("fetch");
        assert!(briefing.summary.contains("Stocks rose"));
    }

    #[tokio::test]
    async fn fetch_not_found_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/briefing.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/briefing.json", server.uri())).unwrap();
        let err = fetch_briefing(&url, &FetchOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DaybriefError::Network(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn fetch_malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/briefing.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/briefing.json", server.uri())).unwrap();
        let err = fetch_briefing(&url, &FetchOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DaybriefError::Parse { .. }), "got {err:?}");
    }
}
