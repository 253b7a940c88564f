//! Result page previews.
//!
//! Fetches a URL over plain HTTP and extracts a short title, description,
//! and body snippet so a hit can be judged without opening it.

use futures::future::join_all;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{DorkError, Result};

const DESCRIPTION_LIMIT: usize = 200;
const SNIPPET_LIMIT: usize = 300;

/// Extracted summary of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePreview {
    pub title: String,
    pub description: String,
    pub snippet: String,
}

/// Fetches pages and extracts previews via plain HTTP requests.
///
/// JavaScript-rendered pages yield whatever the server-side HTML carries,
/// which for previews is usually enough.
pub struct PreviewFetcher {
    client: Client,
}

impl PreviewFetcher {
    /// Creates a new `PreviewFetcher` with default settings.
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .user_agent("Mozilla/5.0 (compatible; dorkhub/0.3)")
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Creates a `PreviewFetcher` with a custom reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetches `url` and extracts its preview.
    pub async fn fetch(&self, url: &str) -> Result<PagePreview> {
        debug!("Fetching preview for {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let html = response.text().await?;
        extract_preview(&html)
    }

    /// Fetches previews for several URLs in parallel.
    ///
    /// Each result is paired with its URL; a failed fetch only affects its
    /// own slot.
    pub async fn fetch_all(&self, urls: &[String]) -> Vec<(String, Result<PagePreview>)> {
        let futures: Vec<_> = urls
            .iter()
            .map(|url| async move { (url.clone(), self.fetch(url).await) })
            .collect();
        join_all(futures).await
    }
}

impl Default for PreviewFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts a preview from raw HTML.
pub fn extract_preview(html: &str) -> Result<PagePreview> {
    let document = Html::parse_document(html);

    let title_selector = selector("title")?;
    let h1_selector = selector("h1")?;
    let meta_selector = selector(r#"meta[name="description"], meta[property="og:description"]"#)?;
    let body_selector = selector("main, article, body")?;

    let title = document
        .select(&title_selector)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty())
        .or_else(|| {
            document
                .select(&h1_selector)
                .next()
                .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        })
        .unwrap_or_default();

    let body_text = document
        .select(&body_selector)
        .next()
        .map(visible_text)
        .unwrap_or_default();

    let description = document
        .select(&meta_selector)
        .filter_map(|el| el.value().attr("content"))
        .map(collapse_whitespace)
        .find(|c| !c.is_empty())
        .unwrap_or_else(|| truncate(&body_text, DESCRIPTION_LIMIT));

    Ok(PagePreview {
        title,
        description,
        snippet: truncate(&body_text, SNIPPET_LIMIT),
    })
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| DorkError::Parse(format!("Failed to parse selector: {:?}", e)))
}

/// Text content of an element with script and style subtrees skipped.
fn visible_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_text(element, &mut out);
    collapse_whitespace(&out)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if name == "script" || name == "style" || name == "noscript" {
        return;
    }
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(child_element) = ElementRef::wrap(child) {
            collect_text(child_element, out);
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit).collect();
    format!("{}...", cut.trim_end())
}
