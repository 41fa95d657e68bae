//! URL classification and comparison tokens.
//!
//! Two tabs are duplicates when their comparison tokens are equal. A token is
//! `scheme://host[:port]` followed by the path with trailing slashes collapsed
//! and, unless queries are ignored, the raw query string. Fragments never
//! take part in the comparison.

use url::Url;

use crate::types::tab::TabRecord;

/// Schemes whose pages are never deduplicated.
pub const EXCLUDED_SCHEMES: [&str; 5] = ["chrome", "chrome-extension", "edge", "devtools", "about"];

/// Outcome of parsing a raw URL string.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedUrl {
    Parsed(Url),
    Unparseable,
}

/// Parses `raw`, reporting failure as a value instead of an error.
pub fn parse(raw: &str) -> ParsedUrl {
    match Url::parse(raw) {
        Ok(url) => ParsedUrl::Parsed(url),
        Err(_) => ParsedUrl::Unparseable,
    }
}

/// Why a tab was left out of deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionReason {
    MissingUrl,
    Pinned,
    ExcludedScheme,
    Unparseable,
}

/// Result of classifying one tab.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Excluded(ExclusionReason),
    Token(String),
}

/// Decides whether a tab takes part in deduplication and, if so, its token.
pub fn classify(tab: &TabRecord, include_pinned: bool, ignore_query: bool) -> Classification {
    let Some(raw) = tab.url() else {
        return Classification::Excluded(ExclusionReason::MissingUrl);
    };
    if tab.pinned && !include_pinned {
        return Classification::Excluded(ExclusionReason::Pinned);
    }
    match parse(raw) {
        ParsedUrl::Unparseable => Classification::Excluded(ExclusionReason::Unparseable),
        ParsedUrl::Parsed(url) if is_excluded_scheme(&url) => {
            Classification::Excluded(ExclusionReason::ExcludedScheme)
        }
        ParsedUrl::Parsed(url) => Classification::Token(token_from(&url, ignore_query)),
    }
}

/// Returns the comparison token for `raw`.
///
/// Never fails: an empty input yields an empty token and an unparseable one
/// is returned unchanged.
pub fn normalize_url(raw: &str, ignore_query: bool) -> String {
    if raw.is_empty() {
        return String::new();
    }
    match parse(raw) {
        ParsedUrl::Parsed(url) => token_from(&url, ignore_query),
        ParsedUrl::Unparseable => raw.to_string(),
    }
}

/// Host of `raw` without a leading `www.`, or `raw` itself when it does not parse.
pub fn display_hostname(raw: &str) -> String {
    match parse(raw) {
        ParsedUrl::Parsed(url) => {
            let host = url.host_str().unwrap_or("");
            host.strip_prefix("www.").unwrap_or(host).to_string()
        }
        ParsedUrl::Unparseable => raw.to_string(),
    }
}

/// Collapses trailing slashes; an empty result becomes `/`.
pub fn trim_trailing_slash(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

fn is_excluded_scheme(url: &Url) -> bool {
    EXCLUDED_SCHEMES.contains(&url.scheme())
}

fn token_from(url: &Url, ignore_query: bool) -> String {
    let mut token = format!("{}://{}", url.scheme(), host_with_port(url));
    token.push_str(trim_trailing_slash(url.path()));
    if !ignore_query {
        // An empty query ("?") compares equal to no query at all.
        if let Some(query) = url.query().filter(|q| !q.is_empty()) {
            token.push('?');
            token.push_str(query);
        }
    }
    token
}

fn host_with_port(url: &Url) -> String {
    let host = url.host_str().unwrap_or("");
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}
