//! Per-engine operator dialect rewriting.
//!
//! The composer emits canonical operator spellings; [`adapt`] rewrites them
//! into the target engine's dialect. Parenthesized literal groups (e.g.
//! `(.mp3 | .flac)`) are emitted pre-formed by the composer and pass through
//! untouched.

use crate::engine::Engine;

/// Operator spellings of one engine dialect.
///
/// Only these five canonical tokens are ever rewritten; value text is left
/// alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub filetype: &'static str,
    pub site: &'static str,
    pub inurl: &'static str,
    pub intitle: &'static str,
    pub or: &'static str,
}

/// The canonical dialect; also the fallback for unknown engines.
pub const GOOGLE_DIALECT: Dialect = Dialect {
    filetype: "filetype:",
    site: "site:",
    inurl: "inurl:",
    intitle: "intitle:",
    or: " OR ",
};

pub const BING_DIALECT: Dialect = Dialect {
    filetype: "filetype:",
    site: "site:",
    inurl: "url:",
    intitle: "title:",
    or: " OR ",
};

pub const DUCKDUCKGO_DIALECT: Dialect = Dialect {
    filetype: "filetype:",
    site: "site:",
    inurl: "inurl:",
    intitle: "title:",
    or: " OR ",
};

pub const YANDEX_DIALECT: Dialect = Dialect {
    filetype: "mime:",
    site: "site:",
    inurl: "inurl:",
    intitle: "title:",
    or: " | ",
};

/// Rewrites canonical operator tokens into the engine's dialect.
///
/// Idempotent under repeated application to the same engine: dialect output
/// never reintroduces a canonical token it rewrote away.
pub fn adapt(query: &str, engine: Engine) -> String {
    let dialect = engine.dialect();
    let mut out = String::with_capacity(query.len());
    let mut rest = query;

    // Parenthesized groups are literal value groups; rewrite only the text
    // between them.
    while let Some(open) = rest.find('(') {
        let (head, tail) = rest.split_at(open);
        out.push_str(&rewrite(head, dialect));
        match tail.find(')') {
            Some(close) => {
                out.push_str(&tail[..=close]);
                rest = &tail[close + 1..];
            }
            None => {
                // Unbalanced group: pass the remainder through verbatim.
                out.push_str(tail);
                rest = "";
            }
        }
    }
    out.push_str(&rewrite(rest, dialect));
    out
}

/// Adapts by engine identifier; unknown identifiers get the Google dialect.
pub fn adapt_for_id(query: &str, engine_id: &str) -> String {
    adapt(query, Engine::from_id(engine_id).unwrap_or(Engine::Google))
}

fn rewrite(segment: &str, dialect: &Dialect) -> String {
    segment
        .replace("filetype:", dialect.filetype)
        .replace("site:", dialect.site)
        .replace("inurl:", dialect.inurl)
        .replace("intitle:", dialect.intitle)
        .replace(" OR ", dialect.or)
}
