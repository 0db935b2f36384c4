//! Preview binary - prints the projects section as the site would render it
//!
//! Usage:
//!   cargo run --bin preview                 # English feed
//!   cargo run --bin preview -- es           # Spanish feed
//!   cargo run --bin preview -- es --json    # Raw ProjectFeed JSON
//!
//! Optional environment variables:
//! - GITHUB_USERNAME (without it only curated projects are shown)
//! - GITHUB_TOKEN
//! - GITHUB_API_URL (defaults to https://api.github.com)

use anyhow::{Context, Result};
use portfolio::config::Config;
use portfolio::github::{GithubClient, RepoListOptions};
use portfolio::i18n::{Language, TranslationCatalog};
use portfolio::view::{load_projects, FeedStatus, ProjectFeed};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("portfolio=info".parse()?),
        )
        .init();

    // Parse CLI arguments
    let args: Vec<String> = std::env::args().skip(1).collect();
    let as_json = args.iter().any(|arg| arg == "--json");
    let locale = args.iter().find(|arg| !arg.starts_with("--")).map(String::as_str);
    let language = Language::from_code_or_default(locale);

    info!("Loading configuration...");
    let config = Config::from_env()?;
    let client = GithubClient::new(&config);

    // Show every public repository the account owns, not just the first page
    let options = RepoListOptions {
        per_page: 100,
        ..RepoListOptions::default()
    };

    info!("Fetching projects ({})...", language);
    let loaded = load_projects(&client, config.github_username.as_deref(), &options).await;
    let feed = ProjectFeed::build(&loaded, language, TranslationCatalog::get());

    if as_json {
        let json = serde_json::to_string_pretty(&feed).context("Failed to serialize feed")?;
        println!("{}", json);
        return Ok(());
    }

    let strings = language.strings();
    println!("\n{}", "=".repeat(60));
    println!("{} ({} {})", strings.projects_title, feed.count, strings.nav_projects.to_lowercase());
    println!("{}\n", "=".repeat(60));

    match &feed.status {
        FeedStatus::Ready => {}
        FeedStatus::Empty { message } => println!("{}\n", message),
        FeedStatus::Failed { message, detail } => println!("{}\n  ({})\n", message, detail),
    }

    for card in &feed.projects {
        let marker = if card.is_custom { "*" } else { " " };
        println!("{} {} [{}]", marker, card.title, card.id);
        if !card.description.is_empty() {
            println!("    {}", card.description);
        }
        println!(
            "    {}: {}  {}: {}  {}: {}",
            strings.label_stars,
            card.stars,
            strings.label_forks,
            card.forks,
            strings.label_updated,
            if card.updated.is_empty() { "-" } else { card.updated.as_str() },
        );
        if let Some(lang) = &card.language {
            println!("    {}", lang);
        }
        println!();
    }

    let report = client.metrics().report();
    info!(
        "Upstream calls: {}, rate limited: {}, failures: {}",
        report.upstream_calls, report.rate_limited, report.failures
    );

    Ok(())
}
