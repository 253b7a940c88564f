//! Engine registry: the fixed set of dispatchable search engines.
//!
//! Each engine is an immutable record of URL base, operator dialect, date
//! filter strategy and query encoding strategy. The set is a closed enum so
//! adding an engine forces every `match` in the crate to be revisited.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::dialect::{Dialect, BING_DIALECT, DUCKDUCKGO_DIALECT, GOOGLE_DIALECT, YANDEX_DIALECT};

/// A dispatchable search engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Google,
    Bing,
    DuckDuckGo,
    Yandex,
    YouTube,
    Scholar,
    Arxiv,
    PubMed,
    StackOverflow,
    Npm,
    PyPi,
    #[serde(rename = "rust")]
    DocsRs,
    Mdn,
    HackerNews,
    News,
}

/// How a query string is encoded into the final URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryEncoding {
    /// Spaces become `+`; quotes and parentheses pass through so operator
    /// syntax stays readable (Google-like engines tolerate this).
    PlusSeparated,
    /// Full percent-encoding.
    PercentEncoded,
}

impl Engine {
    /// All engines, in display order.
    pub fn all() -> &'static [Engine] {
        &[
            Engine::Google,
            Engine::Bing,
            Engine::DuckDuckGo,
            Engine::Yandex,
            Engine::YouTube,
            Engine::Scholar,
            Engine::Arxiv,
            Engine::PubMed,
            Engine::StackOverflow,
            Engine::Npm,
            Engine::PyPi,
            Engine::DocsRs,
            Engine::Mdn,
            Engine::HackerNews,
            Engine::News,
        ]
    }

    /// Resolves an engine identifier (with common aliases).
    ///
    /// Returns `None` for unknown identifiers; callers that need a total
    /// mapping fall back to [`Engine::Google`].
    pub fn from_id(id: &str) -> Option<Engine> {
        match id.trim().to_ascii_lowercase().as_str() {
            "google" | "g" => Some(Engine::Google),
            "bing" => Some(Engine::Bing),
            "duckduckgo" | "ddg" => Some(Engine::DuckDuckGo),
            "yandex" => Some(Engine::Yandex),
            "youtube" | "yt" => Some(Engine::YouTube),
            "scholar" => Some(Engine::Scholar),
            "arxiv" => Some(Engine::Arxiv),
            "pubmed" => Some(Engine::PubMed),
            "stackoverflow" | "so" => Some(Engine::StackOverflow),
            "npm" => Some(Engine::Npm),
            "pypi" => Some(Engine::PyPi),
            "rust" | "docsrs" => Some(Engine::DocsRs),
            "mdn" => Some(Engine::Mdn),
            "hackernews" | "hn" => Some(Engine::HackerNews),
            "news" => Some(Engine::News),
            _ => None,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &'static str {
        match self {
            Engine::Google => "google",
            Engine::Bing => "bing",
            Engine::DuckDuckGo => "duckduckgo",
            Engine::Yandex => "yandex",
            Engine::YouTube => "youtube",
            Engine::Scholar => "scholar",
            Engine::Arxiv => "arxiv",
            Engine::PubMed => "pubmed",
            Engine::StackOverflow => "stackoverflow",
            Engine::Npm => "npm",
            Engine::PyPi => "pypi",
            Engine::DocsRs => "rust",
            Engine::Mdn => "mdn",
            Engine::HackerNews => "hackernews",
            Engine::News => "news",
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Engine::Google => "Google",
            Engine::Bing => "Bing",
            Engine::DuckDuckGo => "DuckDuckGo",
            Engine::Yandex => "Yandex",
            Engine::YouTube => "YouTube",
            Engine::Scholar => "Google Scholar",
            Engine::Arxiv => "arXiv",
            Engine::PubMed => "PubMed",
            Engine::StackOverflow => "Stack Overflow",
            Engine::Npm => "NPM",
            Engine::PyPi => "PyPI",
            Engine::DocsRs => "Rust Docs",
            Engine::Mdn => "MDN",
            Engine::HackerNews => "Hacker News",
            Engine::News => "Google News",
        }
    }

    /// URL prefix the encoded query is appended to.
    pub fn base_url(&self) -> &'static str {
        match self {
            Engine::Google => "https://www.google.com/search?q=",
            Engine::Bing => "https://www.bing.com/search?q=",
            Engine::DuckDuckGo => "https://duckduckgo.com/?q=",
            Engine::Yandex => "https://yandex.com/search/?text=",
            Engine::YouTube => "https://www.youtube.com/results?search_query=",
            Engine::Scholar => "https://scholar.google.com/scholar?q=",
            Engine::Arxiv => "https://arxiv.org/search/?query=",
            Engine::PubMed => "https://pubmed.ncbi.nlm.nih.gov/?term=",
            Engine::StackOverflow => "https://stackoverflow.com/search?q=",
            Engine::Npm => "https://www.npmjs.com/search?q=",
            Engine::PyPi => "https://pypi.org/search/?q=",
            Engine::DocsRs => "https://docs.rs/releases/search?query=",
            Engine::Mdn => "https://developer.mozilla.org/en-US/search?q=",
            Engine::HackerNews => "https://hn.algolia.com/?q=",
            Engine::News => "https://news.google.com/search?q=",
        }
    }

    /// Operator dialect used by [`crate::dialect::adapt`].
    ///
    /// Engines without a documented operator syntax of their own use the
    /// canonical Google dialect.
    pub fn dialect(&self) -> &'static Dialect {
        match self {
            Engine::Bing => &BING_DIALECT,
            Engine::DuckDuckGo => &DUCKDUCKGO_DIALECT,
            Engine::Yandex => &YANDEX_DIALECT,
            _ => &GOOGLE_DIALECT,
        }
    }

    /// Query encoding strategy for the final URL.
    pub fn encoding(&self) -> QueryEncoding {
        match self {
            Engine::Google | Engine::Scholar | Engine::YouTube => QueryEncoding::PlusSeparated,
            _ => QueryEncoding::PercentEncoded,
        }
    }

    /// Engine-specific date-filter suffix appended to the final URL.
    ///
    /// This is layered independently of the generic `after:`/`before:`
    /// tokens embedded in the query text; engines without a URL date
    /// mechanism return the empty string.
    pub fn date_suffix(&self, after: Option<NaiveDate>, before: Option<NaiveDate>) -> String {
        if after.is_none() && before.is_none() {
            return String::new();
        }
        match self {
            Engine::Google => {
                let mut suffix = String::from("&tbs=cdr:1");
                if let Some(after) = after {
                    suffix.push_str(&format!(",cd_min:{}", us_date(after)));
                }
                if let Some(before) = before {
                    suffix.push_str(&format!(",cd_max:{}", us_date(before)));
                }
                suffix
            }
            Engine::Scholar => {
                let mut suffix = String::new();
                if let Some(after) = after {
                    suffix.push_str(&format!("&as_ylo={}", after.year()));
                }
                if let Some(before) = before {
                    suffix.push_str(&format!("&as_yhi={}", before.year()));
                }
                suffix
            }
            Engine::News => {
                // Google News only understands in-query tokens, appended to
                // the already-encoded query.
                let mut tokens = String::new();
                if let Some(after) = after {
                    tokens.push_str(&format!(" after:{}", after));
                }
                if let Some(before) = before {
                    tokens.push_str(&format!(" before:{}", before));
                }
                urlencoding::encode(&tokens).into_owned()
            }
            _ => String::new(),
        }
    }
}

/// US-style date without leading zeros, as Google's `tbs` parameter expects.
fn us_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Builds the final dispatchable URL for an engine.
///
/// Google-like engines keep operator syntax readable (spaces become `+`);
/// all others get full percent-encoding. The engine's own date-filter suffix
/// is appended last.
pub fn finalize_url(
    engine: Engine,
    query: &str,
    after: Option<NaiveDate>,
    before: Option<NaiveDate>,
) -> String {
    let encoded = match engine.encoding() {
        QueryEncoding::PlusSeparated => query.split_whitespace().collect::<Vec<_>>().join("+"),
        QueryEncoding::PercentEncoded => urlencoding::encode(query).into_owned(),
    };
    format!(
        "{}{}{}",
        engine.base_url(),
        encoded,
        engine.date_suffix(after, before)
    )
}
