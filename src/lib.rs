//! prdgen - Turn the latest meeting transcript into a product requirements document
//!
//! Exposes two MCP tools over stdio: one pulls the most recent transcript from
//! Fireflies, the other feeds it to a chat-completion model with a fixed PRD
//! template.

pub mod cli;
pub mod config;
pub mod llm;
pub mod mcp;
pub mod pipeline;
pub mod transcripts;

use thiserror::Error;

/// Main error type for prdgen
#[derive(Error, Debug)]
pub enum PrdError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network or HTTP failure talking to an upstream service.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The transcription service answered but had no usable transcript.
    #[error("No transcript available: {0}")]
    EmptyResult(String),

    /// The language model call failed or returned an error.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Generation was requested with nothing cached and the fallback fetch failed.
    #[error("Failed to fetch transcript. Please run fetch_latest_transcript first.")]
    NoCachedInput(#[source] Box<PrdError>),
}

pub type Result<T> = std::result::Result<T, PrdError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "prdgen";
