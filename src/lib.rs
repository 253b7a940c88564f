//! # dorkhub
//!
//! A search dork composer library with a CLI front end.
//!
//! This library turns a category selection plus free text into advanced
//! search queries, with support for:
//!
//! - A built-in catalog of dork categories and options
//! - Include/exclude term decoration and date range filters
//! - Per-engine operator dialect adaptation
//! - Search URL finalization and multi-engine dispatch
//! - Query history, favorites, and reusable templates
//!
//! ## Example
//!
//! ```rust,no_run
//! use dorkhub::{plan, Catalog, Dispatcher, SearchRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let catalog = Catalog::builtin();
//!     let request = SearchRequest::new("file_search")
//!         .with_text("daft punk discovery")
//!         .with_option("Music")
//!         .with_engines(vec!["google".to_string(), "duckduckgo".to_string()]);
//!
//!     if let Some(plan) = plan(&request, &catalog) {
//!         let report = Dispatcher::default().dispatch(&plan).await;
//!         println!("Opened {} tab(s)", report.opened.len());
//!     }
//!     Ok(())
//! }
//! ```

mod catalog;
mod composer;
mod dialect;
mod dispatch;
mod engine;
mod error;
mod history;
mod lint;
mod preview;
mod request;
mod templates;

pub use catalog::{
    Catalog, Category, CategoryOption, OptionKind, SelectionMode, SubOption, FILE_SEARCH,
};
pub use composer::{build_query, decorate, sanitize_term, subdomain_query, WEB_PAGE_EXCLUSIONS};
pub use dialect::{adapt, adapt_for_id, Dialect};
pub use dispatch::{
    plan, wayback_domain, DispatchPlan, DispatchReport, DispatchTarget, Dispatcher, SystemOpener,
    TabOpener,
};
pub use engine::{finalize_url, Engine, QueryEncoding};
pub use error::{DorkError, Result};
pub use history::{HistoryEntry, HistoryStore, DEFAULT_COLLECTION, HISTORY_LIMIT};
pub use lint::{lint_query, LintFinding, Severity};
pub use preview::{extract_preview, PagePreview, PreviewFetcher};
pub use request::SearchRequest;
pub use templates::{default_templates, Template, TemplateQuery};
