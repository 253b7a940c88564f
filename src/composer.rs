//! Query composition.
//!
//! Pure functions turning a [`SearchRequest`] plus the category catalog into
//! a generic, engine-agnostic dork string. Canonical operator spellings are
//! `filetype:`, `site:`, `inurl:`, `intitle:` and ` OR `; per-engine dialect
//! rewriting happens later in [`crate::dialect`].
//!
//! Every function here is total: malformed or missing input degrades to
//! omission, never to an error. An empty result means "nothing to search".

use lazy_static::lazy_static;
use regex::Regex;

use crate::catalog::{Catalog, Category, OptionKind, FILE_SEARCH};
use crate::request::SearchRequest;

/// Extension exclusions appended to every file-search query to suppress
/// rendered web pages masquerading as directory listings.
pub const WEB_PAGE_EXCLUSIONS: &str = "-inurl:htm -inurl:html -inurl:php -inurl:asp -inurl:jsp";

lazy_static! {
    // A standalone extension token in free text, e.g. ".mp3" or ".tar.gz".
    static ref EXTENSION_TOKEN: Regex =
        Regex::new(r"^\.[A-Za-z0-9]{1,5}(?:\.[A-Za-z0-9]{1,5})?$").expect("valid regex");
}

/// Builds the generic advanced-search string for a request.
///
/// Returns the empty string when the active category is unknown or nothing
/// resolves to query text; callers treat that as "nothing to search yet".
pub fn build_query(request: &SearchRequest, catalog: &Catalog) -> String {
    let Some(category) = catalog.get(&request.category) else {
        return String::new();
    };

    let text = request.text.trim();
    let core = if category.options.is_empty() {
        text.to_string()
    } else if category.id == FILE_SEARCH {
        build_file_search(category, request, text)
    } else {
        build_with_option(category, request, text)
    };

    let decorated = decorate(
        &core,
        &request.include_terms,
        &request.exclude_terms,
        request.exact_phrase,
    );

    let mut parts = vec![decorated];
    if let Some(after) = request.after {
        parts.push(format!("after:{}", after));
    }
    if let Some(before) = request.before {
        parts.push(format!("before:{}", before));
    }
    join_parts(parts)
}

/// Directory-listing composition for the file-search category: base dork,
/// free text, the OR group of selected extensions (plus extensions detected
/// inside the free text) and the fixed web-page exclusions.
fn build_file_search(category: &Category, request: &SearchRequest, text: &str) -> String {
    let option = category.effective_option(request.option.as_deref());
    let mut extensions = option
        .map(|o| o.selected_sub_values(&request.sub_options))
        .unwrap_or_default();

    let (text, detected) = extract_extensions(text);
    for ext in detected {
        if !extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)) {
            extensions.push(ext);
        }
    }

    let group = if extensions.is_empty() {
        String::new()
    } else {
        format!("({})", extensions.join(" | "))
    };

    join_parts([
        category.base_query.clone(),
        text,
        group,
        WEB_PAGE_EXCLUSIONS.to_string(),
    ])
}

/// Composition for a general category with options: the single effective
/// option decides the core fragment.
fn build_with_option(category: &Category, request: &SearchRequest, text: &str) -> String {
    let Some(option) = category.effective_option(request.option.as_deref()) else {
        return text.to_string();
    };
    match &option.kind {
        OptionKind::DomainTarget => subdomain_query(text),
        OptionKind::CustomHandler => text.to_string(),
        OptionKind::Literal(value) => {
            if value.is_empty() {
                text.to_string()
            } else {
                value.clone()
            }
        }
    }
}

/// Builds a subdomain-search fragment from user text, stripping any scheme
/// and path first: `https://example.com/x` becomes `site:*.example.com`.
///
/// Empty input yields the empty string rather than a dangling operator.
pub fn subdomain_query(text: &str) -> String {
    let trimmed = text.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    let domain = without_scheme.split('/').next().unwrap_or("");
    if domain.is_empty() {
        String::new()
    } else {
        format!("site:*.{}", domain)
    }
}

/// Splits standalone extension tokens (e.g. `.mp3`) out of free text.
///
/// Returns the text with those tokens removed, plus the lowercased tokens in
/// order of appearance. Dots inside larger words (domains, version numbers)
/// are left alone.
pub fn extract_extensions(text: &str) -> (String, Vec<String>) {
    let mut kept = Vec::new();
    let mut extensions = Vec::new();
    for token in text.split_whitespace() {
        if EXTENSION_TOKEN.is_match(token) {
            extensions.push(token.to_ascii_lowercase());
        } else {
            kept.push(token);
        }
    }
    (kept.join(" "), extensions)
}

/// Sanitizes a single user-supplied term: trims whitespace, strips
/// leading/trailing quote characters and un-escapes backslash escapes.
pub fn sanitize_term(term: &str) -> String {
    let stripped = term.trim().trim_matches(|c| c == '"' || c == '\'');
    let mut out = String::with_capacity(stripped.len());
    let mut chars = stripped.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Applies include/exclude decoration to a base query.
///
/// Include terms become bare tokens, or are individually double-quoted when
/// `wrap` is set. Exclude terms carry exactly one `-` prefix regardless of
/// how many the raw input had. Empty segments are dropped; the result has no
/// doubled spaces and is idempotent on terms already free of quotes and
/// escapes.
pub fn decorate(base: &str, includes: &[String], excludes: &[String], wrap: bool) -> String {
    let mut parts: Vec<String> = Vec::new();
    let base = base.trim();
    if !base.is_empty() {
        parts.push(base.to_string());
    }
    for term in includes {
        let term = sanitize_term(term);
        if term.is_empty() {
            continue;
        }
        if wrap {
            parts.push(format!("\"{}\"", term));
        } else {
            parts.push(term);
        }
    }
    for term in excludes {
        let term = sanitize_term(term);
        let term = term.trim_start_matches('-');
        if term.is_empty() {
            continue;
        }
        parts.push(format!("-{}", term));
    }
    join_parts(parts)
}

fn join_parts<I>(parts: I) -> String
where
    I: IntoIterator<Item = String>,
{
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn catalog() -> Catalog {
        Catalog::builtin()
    }

    #[test]
    fn test_build_unknown_category_is_empty() {
        let request = SearchRequest::new("missing").with_text("anything");
        assert_eq!(build_query(&request, &catalog()), "");
    }

    #[test]
    fn test_build_optionless_category_is_trimmed_text() {
        let request = SearchRequest::new("code").with_text("  user authentication  ");
        assert_eq!(build_query(&request, &catalog()), "user authentication");
    }

    #[test]
    fn test_build_file_search_music_defaults() {
        let request = SearchRequest::new("file_search")
            .with_option("Music")
            .with_text("daft punk");
        let query = build_query(&request, &catalog());
        assert!(query.contains(r#"intitle:"index of" "last modified" "parent directory""#));
        assert!(query.contains("daft punk"));
        assert!(query.contains("(.mp3 | .flac)"));
        assert!(query.contains(WEB_PAGE_EXCLUSIONS));
        assert!(!query.contains(".m4a"));
        assert!(!query.contains(".wav"));
        assert!(!query.contains(".opus"));
    }

    #[test]
    fn test_build_file_search_extracts_extensions_from_text() {
        let request = SearchRequest::new("file_search")
            .with_option("Music")
            .with_sub_options(vec![".mp3".to_string()])
            .with_text("daft punk .OGG");
        let query = build_query(&request, &catalog());
        assert!(query.contains("(.mp3 | .ogg)"));
        assert!(query.contains("daft punk"));
        assert!(!query.contains(".OGG"));
    }

    #[test]
    fn test_build_file_search_does_not_duplicate_detected_extension() {
        let request = SearchRequest::new("file_search")
            .with_option("Music")
            .with_sub_options(vec![".mp3".to_string()])
            .with_text("daft punk .mp3");
        let query = build_query(&request, &catalog());
        assert_eq!(query.matches(".mp3").count(), 1);
    }

    #[test]
    fn test_build_subdomain_target_strips_scheme_and_path() {
        let request = SearchRequest::new("intelligence")
            .with_option("Find Subdomains")
            .with_text("https://example.com/path");
        assert_eq!(build_query(&request, &catalog()), "site:*.example.com");
    }

    #[test]
    fn test_build_subdomain_target_empty_text_is_empty() {
        let request = SearchRequest::new("intelligence").with_option("Find Subdomains");
        assert_eq!(build_query(&request, &catalog()), "");
    }

    #[test]
    fn test_build_custom_handler_passes_text_verbatim() {
        let request = SearchRequest::new("intelligence")
            .with_option("Wayback Machine")
            .with_text("example.com");
        assert_eq!(build_query(&request, &catalog()), "example.com");
    }

    #[test]
    fn test_build_literal_option_uses_value_token() {
        let request = SearchRequest::new("social")
            .with_option("Reddit")
            .with_text("elon musk");
        assert_eq!(build_query(&request, &catalog()), "site:reddit.com");
    }

    #[test]
    fn test_build_single_select_resolves_exactly_one_option() {
        // No explicit option: the first (default) option contributes, no other.
        let request = SearchRequest::new("social").with_text("john doe");
        let query = build_query(&request, &catalog());
        assert_eq!(query, "site:reddit.com");
        assert!(!query.contains("linkedin"));
    }

    #[test]
    fn test_build_appends_date_bounds() {
        let request = SearchRequest::new("code")
            .with_text("tokio")
            .with_after(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .with_before(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(
            build_query(&request, &catalog()),
            "tokio after:2024-01-01 before:2024-06-01"
        );
    }

    #[test]
    fn test_decorate_noop_without_terms() {
        assert_eq!(decorate("  site:reddit.com  ", &[], &[], false), "site:reddit.com");
        assert_eq!(decorate("", &[], &[], false), "");
    }

    #[test]
    fn test_decorate_wraps_each_include_individually() {
        let includes = vec!["api key".to_string(), "token".to_string()];
        assert_eq!(
            decorate("base", &includes, &[], true),
            r#"base "api key" "token""#
        );
    }

    #[test]
    fn test_decorate_excludes_have_exactly_one_dash() {
        for raw in ["test", "-test", "--test"] {
            let excludes = vec![raw.to_string()];
            let out = decorate("base", &[], &excludes, false);
            assert_eq!(out, "base -test", "raw input {:?}", raw);
        }
    }

    #[test]
    fn test_decorate_drops_blank_terms() {
        let includes = vec!["  ".to_string(), "\"\"".to_string()];
        let excludes = vec!["-".to_string()];
        assert_eq!(decorate("base", &includes, &excludes, true), "base");
    }

    #[test]
    fn test_decorate_idempotent_on_clean_output() {
        let includes = vec!["alpha".to_string()];
        let excludes = vec!["beta".to_string()];
        let once = decorate("site:example.com", &includes, &excludes, false);
        let twice = decorate(&once, &[], &[], false);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sanitize_term_strips_quotes_and_escapes() {
        assert_eq!(sanitize_term(r#""api key""#), "api key");
        assert_eq!(sanitize_term(r"'quoted'"), "quoted");
        assert_eq!(sanitize_term(r"a\-b"), "a-b");
        assert_eq!(sanitize_term("  plain  "), "plain");
    }

    #[test]
    fn test_subdomain_query_variants() {
        assert_eq!(subdomain_query("example.com"), "site:*.example.com");
        assert_eq!(subdomain_query("http://example.com"), "site:*.example.com");
        assert_eq!(
            subdomain_query("https://example.com/deep/path?q=1"),
            "site:*.example.com"
        );
        assert_eq!(subdomain_query(""), "");
    }

    #[test]
    fn test_extract_extensions_leaves_domains_alone() {
        let (text, exts) = extract_extensions("archive web.archive.org .zip");
        assert_eq!(text, "archive web.archive.org");
        assert_eq!(exts, vec![".zip"]);
    }

    #[test]
    fn test_extract_extensions_double_suffix() {
        let (text, exts) = extract_extensions("backup .tar.gz");
        assert_eq!(text, "backup");
        assert_eq!(exts, vec![".tar.gz"]);
    }
}
