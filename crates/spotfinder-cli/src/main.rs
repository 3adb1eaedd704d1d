mod resolve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "spotfinder-cli")]
#[command(about = "Resolve activity suggestions into map locations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a `{restaurants, musics, sports}` payload into `{results}`
    Resolve {
        /// Read input from this file instead of stdin
        #[arg(long)]
        input: Option<PathBuf>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
        /// Treat the input as suggestion text instead of a JSON payload
        #[arg(long)]
        suggestions: bool,
    },
    /// Print the payload parsed from suggestion text, without network calls
    Parse {
        /// Read input from this file instead of stdin
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            input,
            pretty,
            suggestions,
        } => {
            let config = spotfinder_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            tracing::info!(
                env = %config.env,
                operating_city = %config.operating_city,
                "configuration loaded"
            );
            tracing::debug!(?config, "full configuration");
            resolve::run_resolve(&config, input.as_deref(), suggestions, pretty).await?;
        }
        Commands::Parse { input } => {
            init_tracing("info")?;
            resolve::run_parse(input.as_deref()).await?;
        }
    }

    Ok(())
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `default_level`.
fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
