//! Dorkhub CLI - search dork composer command line interface.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use dorkhub::{
    adapt, build_query, default_templates, finalize_url, lint_query, plan, Catalog, DispatchPlan,
    Dispatcher, Engine, HistoryEntry, HistoryStore, PreviewFetcher, SearchRequest, Severity,
};

/// Dorkhub - advanced search query composer CLI
#[derive(Parser)]
#[command(name = "dorkhub")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a query and open it in browser tabs
    Search(SearchArgs),

    /// Compose a query and print it without opening anything
    Build(BuildArgs),

    /// List available search engines
    Engines,

    /// List dork categories
    Categories {
        /// Include categories hidden by safe mode
        #[arg(long)]
        show_unsafe: bool,
    },

    /// Show or clear search history
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// List or expand query templates
    Templates {
        #[command(subcommand)]
        command: TemplateCommand,
    },

    /// Fetch short previews of result URLs
    Preview {
        /// URLs to fetch
        #[arg(required = true)]
        urls: Vec<String>,
    },
}

#[derive(Args)]
struct ComposeArgs {
    /// Free text for the query
    text: Option<String>,

    /// Dork category identifier
    #[arg(short, long, default_value = "file_search")]
    category: String,

    /// Category option label (e.g. "Music")
    #[arg(short, long)]
    option: Option<String>,

    /// Sub-option labels for options that have them
    #[arg(short = 's', long = "sub-option")]
    sub_options: Vec<String>,

    /// Terms every result must contain (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    include: Vec<String>,

    /// Terms to exclude from results (comma-separated)
    #[arg(short = 'x', long, value_delimiter = ',')]
    exclude: Vec<String>,

    /// Quote include terms as exact phrases
    #[arg(long)]
    exact: bool,

    /// Only results after this date (YYYY-MM-DD)
    #[arg(long)]
    after: Option<NaiveDate>,

    /// Only results before this date (YYYY-MM-DD)
    #[arg(long)]
    before: Option<NaiveDate>,

    /// Engines to open (comma-separated)
    /// Available: google, bing, duckduckgo, yandex, youtube, scholar, ...
    #[arg(short, long, value_delimiter = ',')]
    engines: Option<Vec<String>>,

    /// Allow categories hidden by safe mode
    #[arg(long)]
    allow_unsafe: bool,
}

#[derive(Args)]
struct SearchArgs {
    #[command(flatten)]
    compose: ComposeArgs,

    /// Print the planned URLs instead of opening tabs
    #[arg(long)]
    dry_run: bool,

    /// Do not record this search in history
    #[arg(long)]
    no_history: bool,

    /// Delay between tabs in milliseconds
    #[arg(long, default_value = "100")]
    delay: u64,
}

#[derive(Args)]
struct BuildArgs {
    #[command(flatten)]
    compose: ComposeArgs,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum HistoryCommand {
    /// List recent searches
    List {
        /// Maximum entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Remove all history entries
    Clear,
}

#[derive(Subcommand)]
enum TemplateCommand {
    /// List built-in templates
    List,
    /// Expand a template with variable values
    Expand {
        /// Template name
        name: String,
        /// Variable value as key=value (repeatable)
        #[arg(long = "var", value_parser = parse_key_val)]
        vars: Vec<(String, String)>,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid key=value pair: no `=` in `{}`", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    match cli.command {
        Commands::Search(args) => run_search(args).await,
        Commands::Build(args) => run_build(args),
        Commands::Engines => list_engines(),
        Commands::Categories { show_unsafe } => list_categories(show_unsafe),
        Commands::History { command } => run_history(command),
        Commands::Templates { command } => run_templates(command),
        Commands::Preview { urls } => run_preview(&urls).await,
    }
}

fn to_request(args: &ComposeArgs, catalog: &Catalog) -> Result<SearchRequest> {
    let category = catalog
        .get(&args.category)
        .ok_or_else(|| anyhow!("Unknown category: {}", args.category))?;
    if !category.safe && !args.allow_unsafe {
        bail!(
            "Category '{}' is hidden by safe mode; pass --allow-unsafe to use it",
            args.category
        );
    }

    let mut request = SearchRequest::new(&args.category)
        .with_text(args.text.clone().unwrap_or_default())
        .with_sub_options(args.sub_options.clone())
        .with_includes(args.include.clone())
        .with_excludes(args.exclude.clone())
        .with_exact_phrase(args.exact);
    if let Some(option) = &args.option {
        request = request.with_option(option.clone());
    }
    if let Some(after) = args.after {
        request = request.with_after(after);
    }
    if let Some(before) = args.before {
        request = request.with_before(before);
    }
    if let Some(engines) = &args.engines {
        request = request.with_engines(engines.clone());
    }
    Ok(request)
}

fn report_lint(query: &str) {
    for finding in lint_query(query) {
        let label = match finding.severity {
            Severity::Warning => "warning",
            Severity::Suggestion => "note",
        };
        eprintln!("{}: {}", label, finding.message);
    }
}

async fn run_search(args: SearchArgs) -> Result<()> {
    let catalog = Catalog::builtin();
    let request = to_request(&args.compose, &catalog)?;

    let Some(plan) = plan(&request, &catalog) else {
        bail!("Nothing to search: enter a query or pick an option");
    };

    match &plan {
        DispatchPlan::Wayback { domain, url } => {
            println!("Wayback Machine lookup for {}", domain);
            println!("  {}", url);
        }
        DispatchPlan::Engines { query, targets } => {
            report_lint(query);
            println!("Query: {}", query);
            for target in targets {
                println!("  {:<14} {}", target.engine.id(), target.url);
            }
        }
    }

    if args.dry_run {
        return Ok(());
    }

    let dispatcher = Dispatcher::default().with_delay(Duration::from_millis(args.delay));
    let report = dispatcher.dispatch(&plan).await;
    println!(
        "Opened {}/{} tab(s)",
        report.opened.len(),
        report.attempted()
    );
    if !report.blocked.is_empty() {
        eprintln!("Blocked: {}", report.blocked.join(", "));
    }

    // Record only fully successful dispatches so a retry is not deduplicated
    // away.
    if !args.no_history && report.all_opened() {
        let path = HistoryStore::default_path()
            .ok_or_else(|| anyhow!("No data directory available for history"))?;
        let mut store = HistoryStore::open(path);
        let (query, engines) = match &plan {
            DispatchPlan::Wayback { domain, .. } => (domain.clone(), vec!["wayback".to_string()]),
            DispatchPlan::Engines { query, targets } => (
                query.clone(),
                targets.iter().map(|t| t.engine.id().to_string()).collect(),
            ),
        };
        store.add(HistoryEntry::new(query, plan.urls(), engines))?;
    }

    Ok(())
}

fn run_build(args: BuildArgs) -> Result<()> {
    let catalog = Catalog::builtin();
    let request = to_request(&args.compose, &catalog)?;
    let query = build_query(&request, &catalog);
    if query.is_empty() {
        bail!("Nothing to build: enter a query or pick an option");
    }

    let engine_ids = args
        .compose
        .engines
        .clone()
        .unwrap_or_else(|| vec!["google".to_string()]);
    let engines: Vec<Engine> = engine_ids
        .iter()
        .map(|id| Engine::from_id(id).ok_or_else(|| anyhow!("Unknown engine: {}", id)))
        .collect::<Result<_>>()?;

    if args.json {
        let targets: Vec<_> = engines
            .iter()
            .map(|&engine| {
                serde_json::json!({
                    "engine": engine.id(),
                    "query": adapt(&query, engine),
                    "url": finalize_url(engine, &adapt(&query, engine), request.after, request.before),
                })
            })
            .collect();
        let out = serde_json::json!({ "query": query, "targets": targets });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    report_lint(&query);
    println!("Query: {}", query);
    for engine in engines {
        let adapted = adapt(&query, engine);
        let url = finalize_url(engine, &adapted, request.after, request.before);
        println!("\n{} ({})", engine.name(), engine.id());
        println!("  {}", adapted);
        println!("  {}", url);
    }
    Ok(())
}

fn list_engines() -> Result<()> {
    println!("Available search engines:\n");
    for engine in Engine::all() {
        println!("  {:<14} {:<16} {}", engine.id(), engine.name(), engine.base_url());
    }
    println!();
    println!("Usage: dorkhub search \"query\" -e google,duckduckgo");
    Ok(())
}

fn list_categories(show_unsafe: bool) -> Result<()> {
    let catalog = Catalog::builtin();
    for category in catalog.visible(!show_unsafe) {
        let marker = if category.safe { " " } else { "!" };
        println!("{} {:<18} {}", marker, category.id, category.description);
        for option in &category.options {
            println!("      - {}", option.label);
        }
    }
    if !show_unsafe {
        println!("\nSafe mode hides sensitive categories; use --show-unsafe to list them.");
    }
    Ok(())
}

fn run_history(command: HistoryCommand) -> Result<()> {
    let path = HistoryStore::default_path()
        .ok_or_else(|| anyhow!("No data directory available for history"))?;
    let mut store = HistoryStore::open(path);
    match command {
        HistoryCommand::List { limit } => {
            let entries = store.entries();
            if entries.is_empty() {
                println!("No search history.");
                return Ok(());
            }
            for entry in entries.iter().rev().take(limit) {
                println!(
                    "{}  [{}]  {}",
                    entry.timestamp.format("%Y-%m-%d %H:%M"),
                    entry.engines.join(","),
                    entry.query
                );
            }
        }
        HistoryCommand::Clear => {
            store.clear()?;
            println!("History cleared.");
        }
    }
    Ok(())
}

fn run_templates(command: TemplateCommand) -> Result<()> {
    let templates = default_templates();
    match command {
        TemplateCommand::List => {
            for template in &templates {
                println!("{:<22} {}", template.name, template.description);
                println!(
                    "      variables: {}  queries: {}",
                    template.variables.join(", "),
                    template.queries.len()
                );
            }
        }
        TemplateCommand::Expand { name, vars } => {
            let template = templates
                .iter()
                .find(|t| t.name.eq_ignore_ascii_case(&name))
                .ok_or_else(|| anyhow!("Unknown template: {}", name))?;
            let values: HashMap<String, String> = vars.into_iter().collect();
            let filled = template.fill(&values)?;
            for query in filled {
                let engine = Engine::from_id(&query.engine).unwrap_or(Engine::Google);
                println!("{}", query.query);
                println!("  {}", finalize_url(engine, &adapt(&query.query, engine), None, None));
            }
        }
    }
    Ok(())
}

async fn run_preview(urls: &[String]) -> Result<()> {
    let fetcher = PreviewFetcher::new();
    for (url, result) in fetcher.fetch_all(urls).await {
        println!("{}", url);
        match result {
            Ok(preview) => {
                println!("  Title:       {}", preview.title);
                println!("  Description: {}", preview.description);
                println!("  Snippet:     {}", preview.snippet);
            }
            Err(e) => println!("  Error: {}", e),
        }
    }
    Ok(())
}
