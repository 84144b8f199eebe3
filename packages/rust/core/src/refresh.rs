//! Refresh pipeline: fetch the briefing, fall back to the cached copy.

use std::path::PathBuf;

use tracing::{info, instrument, warn};
use url::Url;

use daybrief_fetch::{FetchOptions, cache, fetch_briefing, summary_digest};
use daybrief_shared::{Briefing, Result};

/// Configuration for a refresh run.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Where the briefing document lives.
    pub url: Url,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
    /// Cache file to read the previous document from and write the new one to.
    pub cache_path: PathBuf,
}

/// Outcome of a refresh run.
#[derive(Debug)]
pub struct RefreshOutcome {
    /// The current document — freshly fetched, or the cached copy.
    pub briefing: Briefing,
    /// True when the fetch failed and the cached copy was used instead.
    pub stale: bool,
    /// True when the summary differs from the previously cached document.
    pub changed: bool,
}

/// Fetch the briefing and update the cache.
///
/// A failed fetch is logged and swallowed when a cached copy exists — the
/// previous state is returned flagged as stale. Only when there is nothing
/// to fall back to does the error propagate.
#[instrument(skip_all, fields(url = %config.url))]
pub async fn refresh(config: &RefreshConfig) -> Result<RefreshOutcome> {
    let previous = cache::load_cached_from(&config.cache_path)?;

    let opts = FetchOptions {
        timeout_secs: config.timeout_secs,
    };

    match fetch_briefing(&config.url, &opts).await {
        Ok(briefing) => {
            let changed = previous
                .as_ref()
                .is_none_or(|prev| summary_digest(prev) != summary_digest(&briefing));

            cache::store_cached_at(&config.cache_path, &briefing)?;
            info!(changed, sources = briefing.sources.len(), "briefing refreshed");

            Ok(RefreshOutcome {
                briefing,
                stale: false,
                changed,
            })
        }
        Err(e) => match previous {
            Some(briefing) => {
                warn!(error = %e, "briefing fetch failed, keeping cached copy");
                Ok(RefreshOutcome {
                    briefing,
                    stale: true,
                    changed: false,
                })
            }
            None => Err(e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daybrief_fetch::parse_briefing;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DOC: &str = r####"{"summary": "## MARKETS\nStocks rose 1%", "generated_at": "2025-11-14T06:30:00Z"}"####;

    fn temp_cache(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("daybrief_refresh_{name}_{}.json", std::process::id()))
    }

    async fn serve(doc: &str) -> (MockServer, Url) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/briefing.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(doc.to_string()))
            .mount(&server)
            .await;
        let url = Url::parse(&format!("{}/briefing.json", server.uri())).unwrap();
        (server, url)
    }

    #[tokio::test]
    async fn fresh_fetch_writes_cache_and_reports_changed() {
        let (_server, url) = serve(DOC).await;
        let cache_path = temp_cache("fresh");
        std::fs::remove_file(&cache_path).ok();

        let outcome = refresh(&RefreshConfig {
            url,
            timeout_secs: 5,
            cache_path: cache_path.clone(),
        })
        .await
        .expect("refresh");

        assert!(!outcome.stale);
        assert!(outcome.changed);
        assert!(cache_path.exists());

        std::fs::remove_file(&cache_path).ok();
    }

    #[tokio::test]
    async fn unchanged_document_reports_not_changed() {
        let (_server, url) = serve(DOC).await;
        let cache_path = temp_cache("unchanged");
        cache::store_cached_at(&cache_path, &parse_briefing(DOC).unwrap()).unwrap();

        let outcome = refresh(&RefreshConfig {
            url,
            timeout_secs: 5,
            cache_path: cache_path.clone(),
        })
        .await
        .expect("refresh");

        assert!(!outcome.stale);
        assert!(!outcome.changed);

        std::fs::remove_file(&cache_path).ok();
    }

    #[tokio::test]
    async fn failed_fetch_falls_back_to_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/briefing.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let url = Url::parse(&format!("{}/briefing.json", server.uri())).unwrap();

        let cache_path = temp_cache("fallback");
        cache::store_cached_at(&cache_path, &parse_briefing(DOC).unwrap()).unwrap();

        let outcome = refresh(&RefreshConfig {
            url,
            timeout_secs: 5,
            cache_path: cache_path.clone(),
        })
        .await
        .expect("refresh");

        assert!(outcome.stale);
        assert!(outcome.briefing.summary.contains("MARKETS"));

        std::fs::remove_file(&cache_path).ok();
    }

    #[tokio::test]
    async fn failed_fetch_without_cache_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/briefing.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let url = Url::parse(&format!("{}/briefing.json", server.uri())).unwrap();

        let cache_path = temp_cache("nocache");
        std::fs::remove_file(&cache_path).ok();

        let result = refresh(&RefreshConfig {
            url,
            timeout_secs: 5,
            cache_path,
        })
        .await;

        assert!(result.is_err());
    }
}
