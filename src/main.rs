//! prdgen - Meeting transcript to PRD generator
//!
//! Entry point for the prdgen CLI and MCP server.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use prdgen::cli::{Cli, Commands};
use prdgen::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // A missing .env is fine; the process environment still applies.
    let _ = dotenvy::dotenv();

    match cli.command {
        Commands::Completions { shell } => {
            prdgen::cli::completions::print(shell);
        }
        command => {
            // Load configuration only for runtime commands.
            let settings = Settings::load()?;
            init_logging(cli.verbose, &settings.general.log_level);

            match command {
                Commands::Serve => {
                    prdgen::cli::commands::serve(&settings).await?;
                }
                Commands::Fetch => {
                    prdgen::cli::commands::fetch_transcript(&settings).await?;
                }
                Commands::Generate => {
                    prdgen::cli::commands::generate_prd(&settings).await?;
                }
                Commands::Config(config_cmd) => {
                    prdgen::cli::commands::config_command(&settings, config_cmd)?;
                }
                Commands::Completions { .. } => unreachable!(),
            }
        }
    }

    Ok(())
}

/// RUST_LOG wins, then --verbose, then the configured level. Output goes to
/// stderr; stdout belongs to the JSON-RPC stream.
fn init_logging(verbose: bool, configured_level: &str) {
    let default_level = if verbose { "debug" } else { configured_level };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
