//! Dispatch planning and tab opening.
//!
//! [`plan`] turns a request into the concrete list of URLs to open, routing
//! the Wayback Machine custom handler away from the normal engine flow.
//! [`Dispatcher`] then opens one tab per target, sequentially with a small
//! delay so browser popup blockers do not swallow rapid-fire windows. Each
//! attempt is independent; a blocked tab never cancels the rest.

use std::process::{Command, Stdio};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use crate::catalog::{Catalog, OptionKind};
use crate::composer;
use crate::dialect;
use crate::engine::{finalize_url, Engine};
use crate::request::SearchRequest;

lazy_static! {
    // Anything with a dot-separated label pair passes as a bare domain.
    static ref BARE_DOMAIN: Regex = Regex::new(r"^[^\s/]+\.[^\s/.]+").expect("valid regex");
}

/// One engine's share of a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchTarget {
    pub engine: Engine,
    /// The engine-dialect query behind the URL (for history/preview display).
    pub query: String,
    pub url: String,
}

/// What a search action will actually open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchPlan {
    /// Wayback Machine lookup of a single domain.
    Wayback { domain: String, url: String },
    /// One tab per selected engine.
    Engines {
        /// The generic query before dialect adaptation.
        query: String,
        targets: Vec<DispatchTarget>,
    },
}

impl DispatchPlan {
    /// All URLs this plan would open.
    pub fn urls(&self) -> Vec<String> {
        match self {
            DispatchPlan::Wayback { url, .. } => vec![url.clone()],
            DispatchPlan::Engines { targets, .. } => {
                targets.iter().map(|t| t.url.clone()).collect()
            }
        }
    }
}

/// Plans the dispatch for a request, or `None` when there is nothing to
/// search (empty query, invalid Wayback input). Callers must not open any
/// tab for a `None` plan.
pub fn plan(request: &SearchRequest, catalog: &Catalog) -> Option<DispatchPlan> {
    let category = catalog.get(&request.category)?;
    let option = category.effective_option(request.option.as_deref());

    if matches!(option.map(|o| &o.kind), Some(OptionKind::CustomHandler)) {
        let domain = wayback_domain(&request.text)?;
        let url = format!(
            "https://web.archive.org/web/*/{}",
            urlencoding::encode(&domain)
        );
        return Some(DispatchPlan::Wayback { domain, url });
    }

    let query = composer::build_query(request, catalog);
    if query.is_empty() {
        return None;
    }

    let engine_ids: Vec<&str> = if request.engines.is_empty() {
        vec!["google"]
    } else {
        request.engines.iter().map(String::as_str).collect()
    };

    let mut targets = Vec::new();
    for id in engine_ids {
        // Unknown identifiers are skipped rather than failing the dispatch.
        let Some(engine) = Engine::from_id(id) else {
            warn!("Unknown engine '{}', skipping", id);
            continue;
        };
        if targets.iter().any(|t: &DispatchTarget| t.engine == engine) {
            continue;
        }
        let adapted = dialect::adapt(&query, engine);
        let url = finalize_url(engine, &adapted, request.after, request.before);
        targets.push(DispatchTarget {
            engine,
            query: adapted,
            url,
        });
    }
    if targets.is_empty() {
        return None;
    }

    Some(DispatchPlan::Engines { query, targets })
}

/// Extracts the Wayback lookup domain from user input.
///
/// Full URLs contribute their host; bare domains pass through; anything else
/// is rejected.
pub fn wayback_domain(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if input.starts_with("http://") || input.starts_with("https://") {
        let parsed = url::Url::parse(input).ok()?;
        return parsed.host_str().map(str::to_string);
    }
    if BARE_DOMAIN.is_match(input) {
        return Some(input.to_string());
    }
    None
}

/// Opens one URL in a browser tab.
///
/// Returns whether a handle was obtained; a `false` counts as a blocked
/// dispatch for that target only.
#[async_trait]
pub trait TabOpener: Send + Sync {
    async fn open(&self, url: &str) -> bool;
}

/// Opens tabs through the operating system's URL handler.
pub struct SystemOpener;

#[async_trait]
impl TabOpener for SystemOpener {
    async fn open(&self, url: &str) -> bool {
        let mut command = open_command();
        command
            .arg(url)
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command.spawn().is_ok()
    }
}

#[cfg(target_os = "macos")]
fn open_command() -> Command {
    Command::new("open")
}

#[cfg(target_os = "windows")]
fn open_command() -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn open_command() -> Command {
    Command::new("xdg-open")
}

/// Outcome of a dispatch: which URLs opened and which were blocked.
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    pub opened: Vec<String>,
    pub blocked: Vec<String>,
}

impl DispatchReport {
    /// Whether every attempted tab opened.
    pub fn all_opened(&self) -> bool {
        self.blocked.is_empty() && !self.opened.is_empty()
    }

    /// Total number of attempts.
    pub fn attempted(&self) -> usize {
        self.opened.len() + self.blocked.len()
    }
}

/// Fire-and-forget tab dispatcher.
pub struct Dispatcher {
    opener: Arc<dyn TabOpener>,
    delay: Duration,
}

/// Delay between tab-open attempts; enough for popup blockers to treat each
/// window as a separate user action.
const INTER_TAB_DELAY: Duration = Duration::from_millis(100);

impl Dispatcher {
    /// Creates a dispatcher with the default inter-tab delay.
    pub fn new(opener: Arc<dyn TabOpener>) -> Self {
        Self {
            opener,
            delay: INTER_TAB_DELAY,
        }
    }

    /// Overrides the inter-tab delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    async fn open_one(&self, url: &str, report: &mut DispatchReport) {
        if self.opener.open(url).await {
            debug!("Opened {}", url);
            report.opened.push(url.to_string());
        } else {
            warn!("Dispatch blocked for {}", url);
            report.blocked.push(url.to_string());
        }
    }

    /// Attempts every URL in the plan. There is no cancellation: once
    /// dispatch begins it always tries all targets.
    pub async fn dispatch(&self, plan: &DispatchPlan) -> DispatchReport {
        let mut report = DispatchReport::default();
        match plan {
            DispatchPlan::Wayback { url, .. } => self.open_one(url, &mut report).await,
            DispatchPlan::Engines { targets, .. } => {
                for (i, target) in targets.iter().enumerate() {
                    if i > 0 {
                        tokio::time::sleep(self.delay).await;
                    }
                    self.open_one(&target.url, &mut report).await;
                }
            }
        }
        report
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Arc::new(SystemOpener))
    }
}
