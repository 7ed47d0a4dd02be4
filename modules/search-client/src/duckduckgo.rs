//! Keyless DuckDuckGo search.
//!
//! Text results come from the HTML endpoint (`html.duckduckgo.com/html/`),
//! parsed with `scraper`. Image results need a `vqd` token scraped from the
//! landing page, then a JSON call to `i.js`.

use std::time::Duration;

use percent_encoding::percent_decode_str;
use reqwest::header::REFERER;
use scraper::{Html, Selector};

use crate::error::{Result, SearchError};
use crate::types::{DdgImagesResponse, ImageHit, WebHit};
use crate::{build_http_client, ensure_success};

const HTML_URL: &str = "https://html.duckduckgo.com/html/";
const BASE_URL: &str = "https://duckduckgo.com";

/// Safe-search "moderate" for the image endpoint.
const SAFE_SEARCH_MODERATE: &str = "1";

pub struct DuckDuckGoClient {
    client: reqwest::Client,
    html_url: String,
    base_url: String,
}

impl DuckDuckGoClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeout)?,
            html_url: HTML_URL.to_string(),
            base_url: BASE_URL.to_string(),
        })
    }

    /// Point both endpoints somewhere else (local fixtures in tests).
    pub fn with_base_urls(mut self, html_url: impl Into<String>, base_url: impl Into<String>) -> Self {
        self.html_url = html_url.into();
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Organic web results for `query`, at most `max_results`. `region` is a
    /// DuckDuckGo region code such as `jp-jp`.
    pub async fn text(&self, query: &str, region: &str, max_results: usize) -> Result<Vec<WebHit>> {
        if max_results == 0 {
            return Ok(Vec::new());
        }
        tracing::debug!(query, max_results, region, "DuckDuckGo text search");

        let resp = self
            .client
            .post(&self.html_url)
            .form(&[("q", query), ("kl", region), ("b", "")])
            .header("Accept", "text/html")
            .send()
            .await?;
        let body = ensure_success(resp).await?.text().await?;

        let hits = parse_html_results(&body, max_results)?;
        tracing::debug!(query, count = hits.len(), "DuckDuckGo text search complete");
        Ok(hits)
    }

    /// Image results for `query`, at most `max_results`.
    pub async fn images(&self, query: &str, region: &str, max_results: usize) -> Result<Vec<ImageHit>> {
        if max_results == 0 {
            return Ok(Vec::new());
        }
        tracing::debug!(query, max_results, region, "DuckDuckGo image search");

        let vqd = self.vqd(query).await?;

        let url = format!("{}/i.js", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("l", region),
                ("o", "json"),
                ("q", query),
                ("vqd", vqd.as_str()),
                ("f", ",,,,,"),
                ("p", SAFE_SEARCH_MODERATE),
            ])
            .header(REFERER, format!("{}/", self.base_url))
            .send()
            .await?;
        let body = ensure_success(resp).await?.text().await?;
        let data: DdgImagesResponse = serde_json::from_str(&body)?;

        let hits: Vec<ImageHit> = data
            .results
            .into_iter()
            .filter_map(|r| r.into_hit())
            .take(max_results)
            .collect();
        tracing::debug!(query, count = hits.len(), "DuckDuckGo image search complete");
        Ok(hits)
    }

    async fn vqd(&self, query: &str) -> Result<String> {
        let resp = self
            .client
            .get(format!("{}/", self.base_url))
            .query(&[("q", query)])
            .send()
            .await?;
        let body = ensure_success(resp).await?.text().await?;
        extract_vqd(&body).ok_or(SearchError::MissingToken)
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| SearchError::Parse(format!("bad selector {css}: {e:?}")))
}

/// Extract result blocks from the DuckDuckGo HTML page. Ads are skipped.
pub fn parse_html_results(html: &str, max_results: usize) -> Result<Vec<WebHit>> {
    let result_sel = selector(".result")?;
    let link_sel = selector("a.result__a")?;
    let snippet_sel = selector(".result__snippet")?;

    let doc = Html::parse_document(html);
    let mut hits = Vec::new();

    for result in doc.select(&result_sel) {
        if hits.len() >= max_results {
            break;
        }
        if result.value().classes().any(|c| c == "result--ad") {
            continue;
        }

        let Some(link) = result.select(&link_sel).next() else {
            continue;
        };
        let title = collapse(&link.text().collect::<String>());
        if title.is_empty() {
            continue;
        }
        let url = extract_ddg_url(link.value().attr("href").unwrap_or(""));
        let snippet = result
            .select(&snippet_sel)
            .next()
            .map(|el| collapse(&el.text().collect::<String>()))
            .unwrap_or_default();

        hits.push(WebHit {
            title,
            snippet,
            url,
        });
    }

    Ok(hits)
}

/// DDG wraps result URLs in redirect links like
/// `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`.
pub fn extract_ddg_url(href: &str) -> String {
    if let Some(pos) = href.find("uddg=") {
        let start = pos + 5;
        let end = href[start..]
            .find('&')
            .map(|i| start + i)
            .unwrap_or(href.len());
        let encoded = &href[start..end];
        if !encoded.is_empty() {
            return percent_decode_str(encoded).decode_utf8_lossy().into_owned();
        }
    }
    if let Some(rest) = href.strip_prefix("//") {
        return format!("https://{rest}");
    }
    href.to_string()
}

/// Pull the `vqd` token out of the landing page. It shows up quoted with
/// either quote style, or as a bare query parameter.
pub fn extract_vqd(html: &str) -> Option<String> {
    const PATTERNS: [(&str, &str); 3] = [("vqd=\"", "\""), ("vqd='", "'"), ("vqd=", "&")];
    for (open, close) in PATTERNS {
        if let Some(pos) = html.find(open) {
            let start = pos + open.len();
            if let Some(len) = html[start..].find(close) {
                let token = &html[start..start + len];
                if !token.is_empty() && token.len() < 128 {
                    return Some(token.to_string());
                }
            }
        }
    }
    None
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_PAGE: &str = r#"
        <html><body>
          <div class="result results_links result--ad">
            <a class="result__a" href="https://ads.example.com">Sponsored</a>
            <a class="result__snippet">Buy now</a>
          </div>
          <div class="result results_links">
            <h2><a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.jp%2Frice&amp;rut=abc">
              白米 5kg   公式
            </a></h2>
            <a class="result__snippet">新米を   産地直送</a>
          </div>
          <div class="result results_links">
            <h2><a class="result__a" href="https://shop.example.jp/item">レビュー</a></h2>
            <div class="result__snippet">甘みが強い</div>
          </div>
          <div class="result results_links">
            <h2><a class="result__a" href="https://third.example.jp/">Third</a></h2>
          </div>
        </body></html>
    "#;

    #[test]
    fn parses_results_and_skips_ads() {
        let hits = parse_html_results(RESULTS_PAGE, 5).unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].title, "白米 5kg 公式");
        assert_eq!(hits[0].snippet, "新米を 産地直送");
        assert_eq!(hits[0].url, "https://example.jp/rice");
        assert_eq!(hits[1].url, "https://shop.example.jp/item");
        assert_eq!(hits[2].snippet, "");
    }

    #[test]
    fn respects_max_results() {
        let hits = parse_html_results(RESULTS_PAGE, 2).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[1].title, "レビュー");
    }

    #[test]
    fn empty_page_yields_no_results() {
        let hits = parse_html_results("<html><body>No results.</body></html>", 5).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn unwraps_redirect_urls() {
        assert_eq!(
            extract_ddg_url("//duckduckgo.com/l/?uddg=https%3A%2F%2Fa.example%2Fx%3Fy%3D1&rut=z"),
            "https://a.example/x?y=1"
        );
        assert_eq!(extract_ddg_url("https://plain.example"), "https://plain.example");
        assert_eq!(extract_ddg_url("//cdn.example/img"), "https://cdn.example/img");
    }

    #[test]
    fn finds_vqd_token_in_any_quote_style() {
        assert_eq!(
            extract_vqd(r#"<script>vqd="4-1234567890";</script>"#).as_deref(),
            Some("4-1234567890")
        );
        assert_eq!(
            extract_vqd("<script>vqd='4-999';</script>").as_deref(),
            Some("4-999")
        );
        assert_eq!(
            extract_vqd("/d.js?q=rice&vqd=4-555&kl=jp-jp").as_deref(),
            Some("4-555")
        );
        assert!(extract_vqd("<html>nothing here</html>").is_none());
    }

    #[test]
    fn image_page_keeps_only_full_size_urls() {
        let raw = r#"{"results": [
            {"image": "https://img.example/a.jpg", "title": "a", "width": 600, "thumbnail": "t"},
            {"image": "", "title": "b"}
        ], "next": "i.js?s=100"}"#;
        let data: DdgImagesResponse = serde_json::from_str(raw).unwrap();
        let hits: Vec<ImageHit> = data.results.into_iter().filter_map(|i| i.into_hit()).collect();
        assert_eq!(
            hits,
            vec![ImageHit {
                image: "https://img.example/a.jpg".to_string()
            }]
        );
    }
}
