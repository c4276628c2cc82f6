use anyhow::{bail, Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use job_scraper::cli::{Cli, Commands, PresenterKind, SearchArgs};
use job_scraper::config::{Config, Delimiter, LogConfig, LogFormat};
use job_scraper::export::{resolve_out_path, save_delimited, save_html, save_json};
use job_scraper::filters::FilterRules;
use job_scraper::models::SearchQuery;
use job_scraper::pipeline::{run_search, SearchOutcome};
use job_scraper::presenter::{ConsolePresenter, Presenter, QuietPresenter};
use job_scraper::scrapers::{JobSource, LinkedinScraper};
use job_scraper::utils::http::create_client;

fn init_tracing(log: &LogConfig, verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => log.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::from_default_env().add_directive(format!("job_scraper={}", level).parse()?);

    match log.format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
    }
    Ok(())
}

fn make_presenter(
    kind: PresenterKind,
    config: &Arc<Config>,
    query: &SearchQuery,
    rules: &FilterRules,
) -> Result<Box<dyn Presenter>> {
    match kind {
        PresenterKind::Console => Ok(Box::new(ConsolePresenter::stdout())),
        PresenterKind::Quiet => Ok(Box::new(QuietPresenter)),
        PresenterKind::Window => window_presenter(config, query, rules),
    }
}

#[cfg(feature = "gui")]
fn window_presenter(config: &Arc<Config>, query: &SearchQuery, rules: &FilterRules) -> Result<Box<dyn Presenter>> {
    use job_scraper::presenter::window::WindowPresenter;
    Ok(Box::new(WindowPresenter::new(config.clone(), query.clone(), rules.clone())))
}

#[cfg(not(feature = "gui"))]
fn window_presenter(_config: &Arc<Config>, _query: &SearchQuery, _rules: &FilterRules) -> Result<Box<dyn Presenter>> {
    bail!("This build has no window support, rebuild with `--features gui`")
}

/// Write every export requested on the command line, returning what was saved
fn export(config: &Config, args: &SearchArgs, outcome: &SearchOutcome, rules: &FilterRules) -> Result<Vec<String>> {
    let folder = &config.output.folder;
    let results = &outcome.results;
    let mut saved = Vec::new();

    for (path, delimiter) in [(&args.csv, Delimiter::Comma), (&args.tsv, Delimiter::Tab)] {
        if let Some(path) = path {
            save_delimited(path, results, delimiter)?;
            saved.push(path.display().to_string());
        }
    }
    if let Some(path) = &args.json {
        save_json(path, results)?;
        saved.push(path.display().to_string());
    }
    if let Some(explicit) = &args.html {
        let path = resolve_out_path(explicit.as_deref(), folder, &outcome.query, "html");
        let marks = rules.description_keywords();
        save_html(&path, results, args.mark_keywords(config).then_some(&marks))?;
        saved.push(path.display().to_string());
    }
    Ok(saved)
}

async fn search(cli_presenter: PresenterKind, config: Arc<Config>, source: &LinkedinScraper, args: SearchArgs) -> Result<()> {
    let query = args.query.query(&config);
    let rules = args.rules.rules(&config);
    // Fail before scraping when no window can be opened
    let mut presenter = make_presenter(cli_presenter, &config, &query, &rules)?;

    let outcome = run_search(source, &query, &rules, args.fetch_descriptions(&config))
        .await
        .context("Search failed")?;

    for path in export(&config, &args, &outcome, &rules)? {
        presenter.notify(&format!("Saved {} job(s) to {}", outcome.results.len(), path))?;
    }
    presenter.present(&outcome)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    init_tracing(&config.log, cli.verbose)?;
    info!("Starting job scraper");

    let config = Arc::new(config);
    let client = create_client(&config.http)?;
    let source = LinkedinScraper::new(config.clone(), client);

    // count and check always report on the console
    let mut console = ConsolePresenter::stdout();
    match cli.command {
        Commands::Search(args) => search(cli.presenter, config, &source, args).await?,
        Commands::Count(args) => {
            let query = args.query(&config);
            match source.count_jobs(&query).await? {
                Some(n) => console.notify(&format!("Number of jobs: {}", n))?,
                None => console.warn("The search page did not show a job count")?,
            }
        }
        Commands::Check => {
            source.test_connection().await?;
            console.notify("Connection successful")?;
        }
        Commands::Gui(args) => {
            let query = args.query(&config);
            open_window(config, query)?;
        }
    }

    Ok(())
}

#[cfg(feature = "gui")]
fn open_window(config: Arc<Config>, query: SearchQuery) -> Result<()> {
    use job_scraper::presenter::window::WindowPresenter;
    let rules = config.filters.rules();
    WindowPresenter::new(config, query, rules).launch()
}

#[cfg(not(feature = "gui"))]
fn open_window(_config: Arc<Config>, _query: SearchQuery) -> Result<()> {
    bail!("This build has no window support, rebuild with `--features gui`")
}
