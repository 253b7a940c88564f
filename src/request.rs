//! Search request snapshot.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An immutable snapshot of the current search configuration.
///
/// The UI (or CLI) layer rebuilds this on every relevant input change and
/// passes it into the composer; the composer never mutates it, so concurrent
/// composition calls cannot interfere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Active category identifier.
    pub category: String,
    /// Free-text query input.
    pub text: String,
    /// Selected option label; `None` falls back to the category default.
    pub option: Option<String>,
    /// Selected sub-option labels; empty falls back to the defaults.
    pub sub_options: Vec<String>,
    /// Terms that must appear in results.
    pub include_terms: Vec<String>,
    /// Terms to negate.
    pub exclude_terms: Vec<String>,
    /// Wrap each include term in double quotes.
    pub exact_phrase: bool,
    /// Lower date bound.
    pub after: Option<NaiveDate>,
    /// Upper date bound.
    pub before: Option<NaiveDate>,
    /// Selected engine identifiers; empty falls back to Google.
    pub engines: Vec<String>,
}

impl SearchRequest {
    /// Creates a request for the given category with everything else unset.
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            text: String::new(),
            option: None,
            sub_options: Vec::new(),
            include_terms: Vec::new(),
            exclude_terms: Vec::new(),
            exact_phrase: false,
            after: None,
            before: None,
            engines: Vec::new(),
        }
    }

    /// Sets the free-text input.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets the selected option by label.
    pub fn with_option(mut self, label: impl Into<String>) -> Self {
        self.option = Some(label.into());
        self
    }

    /// Sets the selected sub-option labels.
    pub fn with_sub_options(mut self, labels: Vec<String>) -> Self {
        self.sub_options = labels;
        self
    }

    /// Sets the include terms.
    pub fn with_includes(mut self, terms: Vec<String>) -> Self {
        self.include_terms = terms;
        self
    }

    /// Sets the exclude terms.
    pub fn with_excludes(mut self, terms: Vec<String>) -> Self {
        self.exclude_terms = terms;
        self
    }

    /// Enables exact-phrase wrapping of include terms.
    pub fn with_exact_phrase(mut self, exact: bool) -> Self {
        self.exact_phrase = exact;
        self
    }

    /// Sets the lower date bound.
    pub fn with_after(mut self, date: NaiveDate) -> Self {
        self.after = Some(date);
        self
    }

    /// Sets the upper date bound.
    pub fn with_before(mut self, date: NaiveDate) -> Self {
        self.before = Some(date);
        self
    }

    /// Sets the selected engines.
    pub fn with_engines(mut self, engines: Vec<String>) -> Self {
        self.engines = engines;
        self
    }
}
