use anyhow::Result;
use portfolio::{config, server};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("portfolio=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    info!("Starting portfolio API");

    let config = config::Config::from_env()?;

    match &config.github_username {
        Some(username) => info!("Listing repositories for GitHub user {}", username),
        None => warn!("GITHUB_USERNAME not set, only curated projects will be served"),
    }
    if config.github_token.is_none() {
        info!("GITHUB_TOKEN not set, using unauthenticated GitHub rate limits");
    }

    server::serve(config).await
}
