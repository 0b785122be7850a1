use anyhow::Context;
use clap::Parser;
use peer_config::PeerConfig;

mod cli;
mod commands;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("peerlist error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    match &cli.command {
        cli::Commands::Filter(args) => commands::filter::handle(args, cli.format),
        cli::Commands::Lookup(args) => {
            commands::lookup::handle(args, &load_config()?, cli.format).await
        }
        cli::Commands::Check(args) => commands::check::handle(args, &load_config()?, cli.format),
    }
}

/// `filter` works offline and never needs this.
fn load_config() -> anyhow::Result<PeerConfig> {
    let config = PeerConfig::load_with_dotenv().context("failed to load peerlist configuration")?;
    tracing::debug!(search_url = %config.lookup.search_url(), "configuration loaded");
    Ok(config)
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("PEERLIST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
