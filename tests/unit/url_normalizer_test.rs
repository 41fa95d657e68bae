//! Tests for comparison tokens, display hostnames, and eligibility.

use rstest::rstest;

use tabdedup::services::url_normalizer::{
    classify, display_hostname, normalize_url, Classification, ExclusionReason,
};
use tabdedup::types::tab::TabRecord;

fn tab(url: &str) -> TabRecord {
    TabRecord {
        id: 1,
        url: Some(url.to_string()),
        ..Default::default()
    }
}

#[rstest]
#[case("https://x.com/a/", "https://x.com/a")]
#[case("https://x.com/a//", "https://x.com/a")]
#[case("https://x.com", "https://x.com/")]
#[case("https://x.com/", "https://x.com/")]
#[case("HTTPS://X.COM/Path/", "https://x.com/Path")]
#[case("https://x.com/a?b=1&a=2", "https://x.com/a?b=1&a=2")]
#[case("https://x.com/a/?q=1#frag", "https://x.com/a?q=1")]
#[case("file:///home/me/notes/", "file:///home/me/notes")]
fn token_shapes(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(normalize_url(raw, false), expected);
}

#[test]
fn trailing_slash_collapses() {
    assert_eq!(
        normalize_url("https://x.com/a/", false),
        normalize_url("https://x.com/a", false)
    );
}

#[test]
fn query_ignored_when_requested() {
    assert_eq!(
        normalize_url("https://x.com/a?x=1", true),
        normalize_url("https://x.com/a?y=2", true)
    );
    assert_eq!(normalize_url("https://x.com/a/?x=1", true), "https://x.com/a");
}

#[test]
fn query_distinguishes_when_not_ignored() {
    assert_ne!(
        normalize_url("https://x.com/a?x=1", false),
        normalize_url("https://x.com/a?y=2", false)
    );
}

#[test]
fn query_parameter_order_matters() {
    assert_ne!(
        normalize_url("https://x.com/?a=1&b=2", false),
        normalize_url("https://x.com/?b=2&a=1", false)
    );
}

#[test]
fn scheme_and_port_distinguish() {
    assert_ne!(
        normalize_url("http://x.com/", false),
        normalize_url("https://x.com/", false)
    );
    assert_ne!(
        normalize_url("https://x.com:8443/", false),
        normalize_url("https://x.com/", false)
    );
}

#[test]
fn www_is_part_of_the_token_but_not_the_hostname() {
    assert_ne!(
        normalize_url("https://www.x.com/", false),
        normalize_url("https://x.com/", false)
    );
    assert_eq!(display_hostname("https://www.x.com/"), "x.com");
    assert_eq!(display_hostname("https://x.com:8080/"), "x.com");
}

#[test]
fn normalization_never_fails() {
    assert_eq!(normalize_url("", false), "");
    assert_eq!(normalize_url("just words", true), "just words");
    assert_eq!(normalize_url("http://[::1", false), "http://[::1");
}

#[rstest]
#[case("chrome://settings")]
#[case("chrome://newtab/")]
#[case("chrome-extension://abcdef/popup.html")]
#[case("edge://settings/privacy")]
#[case("devtools://devtools/bundled/inspector.html")]
#[case("about:blank")]
fn internal_schemes_are_excluded(#[case] raw: &str) {
    assert_eq!(
        classify(&tab(raw), true, false),
        Classification::Excluded(ExclusionReason::ExcludedScheme)
    );
}

#[test]
fn unparseable_urls_are_excluded() {
    assert_eq!(
        classify(&tab("not a url at all"), true, true),
        Classification::Excluded(ExclusionReason::Unparseable)
    );
}

#[test]
fn empty_url_is_excluded() {
    assert_eq!(
        classify(&tab(""), true, false),
        Classification::Excluded(ExclusionReason::MissingUrl)
    );
}

#[test]
fn eligible_tab_gets_its_token() {
    assert_eq!(
        classify(&tab("https://docs.rs/url/"), false, false),
        Classification::Token("https://docs.rs/url".to_string())
    );
}
