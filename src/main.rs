use clap::Parser;
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use newsdesk::app::AppContext;
use newsdesk::cli::{commands, Cli, Commands};
use newsdesk::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Commands::Subscribe { email } = &cli.command {
        commands::subscribe(email.clone()).await?;
        return Ok(());
    }

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;
    if config.news.api_key.is_empty() {
        warn!("No news API key configured; set NEWS_API_KEY or news.api_key");
    }

    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Run { .. } => commands::run(&ctx).await?,
        Commands::Headlines => commands::headlines(&ctx).await?,
        Commands::Subscribe { .. } => {}
    }

    Ok(())
}
