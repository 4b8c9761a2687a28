// src/fetch/html.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever, so malformed markup still yields a document
//
// We also use the `url` crate to resolve relative hrefs against the page URL,
// the same way a browser would.
// =============================================================================

use crate::error::FetchError;
use scraper::{Html, Selector};
use url::Url;

// Extracts the absolute target of every <a href> in a document
//
// Parameters:
//   html: the HTML content to parse
//   page_url: the URL the document was fetched from (base for relative hrefs)
//
// Returns: absolute http/https URLs in document order, duplicates included.
// Hrefs that cannot be resolved are skipped.
//
// Example:
//   html = "<a href='/docs'>Docs</a>"
//   page_url = "https://example.com/page"
//   result = ["https://example.com/docs"]
pub fn extract_links(html: &str, page_url: &Url) -> Result<Vec<String>, FetchError> {
    let document = Html::parse_document(html);
    let selector =
        Selector::parse("a[href]").map_err(|e| FetchError::Parse(e.to_string()))?;

    let links = document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_url(page_url, href))
        .filter(|url| is_web_link(url))
        .collect();

    Ok(links)
}

// Resolves a possibly-relative href to an absolute URL
//
// Url::join handles both cases: an absolute href replaces the base entirely,
// a relative one is resolved against it.
//
// Examples:
//   base = "https://example.com/page/"
//   href = "/docs"       -> Some("https://example.com/docs")
//   href = "../other"    -> Some("https://example.com/other")
//   href = "http://[::1" -> None (not a valid URL)
fn resolve_url(base: &Url, href: &str) -> Option<String> {
    base.join(href.trim()).ok().map(|url| url.to_string())
}

// Only http/https targets can be crawled.
// mailto:, tel:, javascript:, data: and friends are dropped here.
fn is_web_link(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
