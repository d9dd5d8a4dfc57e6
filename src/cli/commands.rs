//! CLI command implementations

use anyhow::Result;

use crate::cli::args::ConfigCommand;
use crate::config::Settings;
use crate::pipeline::{DocumentPipeline, FetchPayload, GeneratedDocument};

/// Run the MCP server on stdio
pub async fn serve(settings: &Settings) -> Result<()> {
    crate::mcp::run(settings).await
}

/// Fetch the latest transcript once and print the tool payload
pub async fn fetch_transcript(settings: &Settings) -> Result<()> {
    let mut pipeline = DocumentPipeline::from_settings(settings)?;

    let payload = FetchPayload::from(pipeline.fetch_and_cache().await);
    if let FetchPayload::Error { message } = &payload {
        anyhow::bail!("{}", message);
    }

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

/// Generate a PRD from the latest transcript and print it
pub async fn generate_prd(settings: &Settings) -> Result<()> {
    let mut pipeline = DocumentPipeline::from_settings(settings)?;

    match GeneratedDocument::from(pipeline.generate().await) {
        GeneratedDocument::Document(text) => {
            println!("{}", text);
            Ok(())
        }
        GeneratedDocument::Failed { error } => anyhow::bail!("{}", error),
    }
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            println!("{}", toml::to_string_pretty(&redacted(settings))?);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

/// Copy of the settings with API keys masked for display.
fn redacted(settings: &Settings) -> Settings {
    let mut shown = settings.clone();
    shown.transcripts.api_key = mask(&shown.transcripts.api_key);
    shown.llm.api_key = mask(&shown.llm.api_key);
    shown
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        "********".to_string()
    }
}
