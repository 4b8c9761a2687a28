// src/crawl/filter.rs
// =============================================================================
// Link filtering and normalization.
//
// Every link discovered on a page goes through three checks before the
// crawler follows it:
// 1. Is it in scope? (does it contain the scope pattern)
// 2. Is it crawlable? (does it NOT end with an excluded file extension)
// 3. Has it already been visited? (handled by VisitedSet, not here)
//
// All three checks work on normalized URLs, so normalize_url() lives here too.
//
// The scope pattern is a raw regex fragment wrapped in ".*" on both sides and
// matched against the whole URL. Regex metacharacters in the fragment are
// live: "example.com" also matches "examplexcom". ScopeMode::Literal escapes
// the fragment first for callers who want plain substring matching.
// =============================================================================

use crate::error::CrawlError;
use regex::Regex;
use url::Url;

// File extensions that never lead to an HTML page worth crawling.
// Matched as a suffix of the lowercased URL.
const EXCLUDED_EXTENSIONS: [&str; 4] = [".py", ".zip", ".xls", ".pdf"];

/// How the scope fragment is interpreted when the pattern is compiled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScopeMode {
    /// The fragment is a raw regex fragment
    #[default]
    Regex,
    /// The fragment is escaped and matched as a plain substring
    Literal,
}

/// A compiled scope pattern: "does this URL contain the fragment?"
#[derive(Debug, Clone)]
pub struct ScopePattern {
    fragment: String,
    mode: ScopeMode,
    regex: Regex,
}

impl ScopePattern {
    // Compiles the containment pattern for a fragment
    //
    // The fragment is wrapped as ^(?:.*FRAGMENT.*)$, which is the same thing
    // as "the entire URL matches .*FRAGMENT.*".
    //
    // Returns: CrawlError::InvalidPattern if the wrapped fragment does not
    // compile (e.g. an unbalanced parenthesis in Regex mode)
    pub fn new(fragment: &str, mode: ScopeMode) -> Result<Self, CrawlError> {
        let body = match mode {
            ScopeMode::Regex => fragment.to_string(),
            ScopeMode::Literal => regex::escape(fragment),
        };

        let regex = Regex::new(&format!("^(?:.*{}.*)$", body)).map_err(|source| {
            CrawlError::InvalidPattern {
                pattern: fragment.to_string(),
                source,
            }
        })?;

        Ok(Self {
            fragment: fragment.to_string(),
            mode,
            regex,
        })
    }

    /// The fragment as the caller supplied it.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn mode(&self) -> ScopeMode {
        self.mode
    }

    pub fn matches(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }
}

/// True if `url` (already normalized) falls inside the crawl's scope.
pub fn is_in_scope(url: &str, scope: &ScopePattern) -> bool {
    scope.matches(url)
}

/// True unless `url` ends with one of the excluded extensions.
///
/// Suffix-based: `report.pdf` is rejected, `report.pdf.html` is not.
pub fn is_crawlable(url: &str) -> bool {
    !EXCLUDED_EXTENSIONS.iter().any(|ext| url.ends_with(ext))
}

// Normalizes a URL so that case variants compare equal
//
// Steps:
//   1. Lowercase the whole string
//   2. If it parses as an absolute URL, use the url crate's canonical form
//      (adds the root "/" path, drops default ports, etc.)
//
// Text that does not parse is kept as the lowercased string; the fetcher
// reports it as an invalid URL later.
//
// Examples:
//   "HTTP://Example.COM"      -> "http://example.com/"
//   "http://EXAMPLE.com:80/A" -> "http://example.com/a"
pub fn normalize_url(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    match Url::parse(&lowered) {
        // Percent-encoding can reintroduce uppercase hex digits
        Ok(url) => url.as_str().to_lowercase(),
        Err(_) => lowered,
    }
}
