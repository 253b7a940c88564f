//! Lightweight query checks run before dispatch.
//!
//! Findings never block a search; they flag constructs that engines tend to
//! misinterpret.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref QUOTED_SITE: Regex = Regex::new(r#""site:[^\s"]+""#).unwrap();
    static ref DOUBLE_SPACE: Regex = Regex::new(r"\s{2,}").unwrap();
    static ref DANGLING_SITE: Regex = Regex::new(r"\bsite\s*:\s*\.").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Suggestion,
}

/// One issue found in a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintFinding {
    pub severity: Severity,
    pub message: String,
}

impl LintFinding {
    fn warning(message: &str) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.to_string(),
        }
    }

    fn suggestion(message: &str) -> Self {
        Self {
            severity: Severity::Suggestion,
            message: message.to_string(),
        }
    }
}

/// Checks a finished query string for common mistakes.
pub fn lint_query(query: &str) -> Vec<LintFinding> {
    let mut findings = Vec::new();

    if query.trim().is_empty() {
        findings.push(LintFinding::warning("Query is empty."));
        return findings;
    }
    if query.matches('"').count() % 2 != 0 {
        findings.push(LintFinding::warning("Unbalanced double quotes."));
    }
    if QUOTED_SITE.is_match(query) {
        findings.push(LintFinding::warning("Do not quote site: operators."));
    }
    if DOUBLE_SPACE.is_match(query) {
        findings.push(LintFinding::suggestion(
            "Multiple consecutive spaces; engines treat them as one.",
        ));
    }
    if DANGLING_SITE.is_match(query) {
        findings.push(LintFinding::suggestion(
            "site: followed by a bare dot; did you mean a full domain?",
        ));
    }

    findings
}
