//! DuckDuckGo news search client
//!
//! Full-text search over the DuckDuckGo HTML endpoint. Results are ranked
//! (title, link, snippet) triples; redirect-wrapped result URLs are
//! unwrapped to their target. Failures never surface to the caller: a
//! degraded search returns an empty list and logs a warning.

use regex::Regex;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::error::{MarketError, Result};

const SEARCH_URL: &str = "https://html.duckduckgo.com/html/";

const SEARCH_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

static RESULT_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)class="result__a"[^>]*href="([^"]+)"[^>]*>(.*?)</a>"#)
        .expect("valid result link regex")
});

static RESULT_SNIPPET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)class="result__snippet"[^>]*>(.*?)</a>"#)
        .expect("valid result snippet regex")
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

/// A single ranked search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

/// DuckDuckGo search client
pub struct NewsClient {
    client: Client,
}

impl NewsClient {
    /// Create a new search client
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(SEARCH_USER_AGENT));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Search for news, returning at most `max_results` items
    ///
    /// Never fails: transport or parse errors degrade to an empty result
    /// list so a missing news section does not abort the chat turn.
    pub async fn search(&self, query: &str, max_results: usize) -> Vec<NewsItem> {
        match self.fetch(query, max_results).await {
            Ok(items) => items,
            Err(e) => {
                warn!("News search failed for {query:?}: {e}");
                Vec::new()
            }
        }
    }

    async fn fetch(&self, query: &str, max_results: usize) -> Result<Vec<NewsItem>> {
        debug!("Searching news for {query:?}");

        let response = self
            .client
            .get(SEARCH_URL)
            .query(&[("q", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MarketError::Api(format!(
                "DuckDuckGo search error: HTTP {}",
                response.status()
            )));
        }

        let html = response.text().await?;
        Ok(parse_results(&html, max_results))
    }
}

/// Extract ranked results from the search response markup
fn parse_results(html: &str, max_results: usize) -> Vec<NewsItem> {
    let snippets: Vec<String> = RESULT_SNIPPET_RE
        .captures_iter(html)
        .map(|c| clean_text(&c[1]))
        .collect();

    RESULT_LINK_RE
        .captures_iter(html)
        .take(max_results)
        .enumerate()
        .map(|(i, c)| NewsItem {
            title: clean_text(&c[2]),
            link: resolve_redirect(&c[1]),
            snippet: snippets.get(i).cloned().unwrap_or_default(),
        })
        .filter(|item| !item.title.is_empty() && !item.link.is_empty())
        .collect()
}

/// Strip markup and decode the entities DuckDuckGo emits
fn clean_text(fragment: &str) -> String {
    let stripped = TAG_RE.replace_all(fragment, "");
    stripped
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .trim()
        .to_string()
}

/// Unwrap DuckDuckGo's redirect URLs to the target link
///
/// Result hrefs look like `//duckduckgo.com/l/?uddg=<encoded target>&rut=...`.
fn resolve_redirect(href: &str) -> String {
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };

    let Ok(parsed) = Url::parse(&absolute) else {
        return absolute;
    };

    if parsed.path().starts_with("/l/") {
        if let Some((_, target)) = parsed.query_pairs().find(|(k, _)| k == "uddg") {
            return target.into_owned();
        }
    }

    absolute
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <div class="result results_links results_links_deep web-result">
          <a rel="nofollow" class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fapple%2Dearnings&amp;rut=abc">Apple beats <b>earnings</b> estimates</a>
          <a class="result__snippet" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fapple%2Dearnings">Apple reported record &amp; revenue.</a>
        </div>
        <div class="result results_links results_links_deep web-result">
          <a rel="nofollow" class="result__a" href="https://example.org/markets">Markets rally</a>
          <a class="result__snippet" href="https://example.org/markets">Stocks rose on Friday.</a>
        </div>
    "#;

    #[test]
    fn test_parse_results() {
        let items = parse_results(SAMPLE_HTML, 5);
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].title, "Apple beats earnings estimates");
        assert_eq!(items[0].link, "https://example.com/apple-earnings");
        assert_eq!(items[0].snippet, "Apple reported record & revenue.");

        assert_eq!(items[1].title, "Markets rally");
        assert_eq!(items[1].link, "https://example.org/markets");
    }

    #[test]
    fn test_parse_results_caps_at_max() {
        let items = parse_results(SAMPLE_HTML, 1);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Apple beats earnings estimates");
    }

    #[test]
    fn test_parse_results_empty_html() {
        assert!(parse_results("<html></html>", 5).is_empty());
    }

    #[test]
    fn test_resolve_redirect_unwraps_target() {
        let resolved = resolve_redirect(
            "//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fa%3Fb%3D1&rut=xyz",
        );
        assert_eq!(resolved, "https://example.com/a?b=1");
    }

    #[test]
    fn test_resolve_redirect_passes_plain_urls() {
        assert_eq!(
            resolve_redirect("https://example.org/markets"),
            "https://example.org/markets"
        );
    }

    #[test]
    fn test_clean_text_strips_markup_and_entities() {
        assert_eq!(
            clean_text("Apple &amp; <b>Microsoft</b> earnings"),
            "Apple & Microsoft earnings"
        );
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_live_search() {
        let client = NewsClient::new(Duration::from_secs(30)).unwrap();
        let items = client.search("AAPL stock news", 3).await;
        assert!(items.len() <= 3);
    }
}
