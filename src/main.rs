use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use funda_listings::adapters::funda::client::FundaHttpClient;
use funda_listings::adapters::funda::parsers::detail::DetailTreeFlattener;
use funda_listings::adapters::resolver::ListingResolver;
use funda_listings::config::{API_KEY_ENV, apply_env_overrides, load_config};
use funda_listings::domain::listing::Listing;
use funda_listings::domain::report::SearchReport;

const CONFIG_FILE: &str = "config.yaml";

/// The path given as the first argument, else the first existing
/// `config.yaml` in the working directory or beside the binary.
fn resolve_config_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        let local = PathBuf::from(CONFIG_FILE);
        if local.exists() {
            return local;
        }
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE)))
            .filter(|beside_exe| beside_exe.exists())
            .unwrap_or(local)
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logging goes to stderr, stdout carries the listings
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config_path = resolve_config_path(std::env::args_os().nth(1).map(PathBuf::from));
    let mut config = load_config(&config_path)?;
    apply_env_overrides(&mut config);

    if config.api.api_key.is_empty() {
        tracing::warn!("No API key configured, set api.api_key or {API_KEY_ENV}");
    }

    let client =
        FundaHttpClient::new(&config.api).context("failed to build HTTP client for Funda API")?;
    let resolver = ListingResolver::new(
        Arc::new(client),
        DetailTreeFlattener::new(config.detail.max_tree_depth),
    );

    let query = config.search.first_query();
    tracing::info!(
        options = %query.options,
        start_page = query.page,
        pages = config.search.pages,
        "Starting Funda search"
    );

    let reports = resolver.resolve_pages(&query, config.search.pages).await?;
    let failed: usize = reports.iter().map(|r| r.failures().count()).sum();
    let listings: Vec<Listing> = reports
        .into_iter()
        .flat_map(SearchReport::into_listings)
        .collect();

    tracing::info!(listings = listings.len(), failed, "Search finished");

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &listings)?;
    writeln!(stdout)?;

    Ok(())
}
