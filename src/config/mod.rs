//! Configuration module for prdgen
//!
//! Handles loading settings from a TOML file, `.env`, and the environment.

mod settings;

pub use settings::{
    GeneralSettings, LlmSettings, ServerSettings, Settings, TranscriptSettings,
    FIREFLIES_API_KEY_ENV, OPENAI_API_KEY_ENV,
};

pub(crate) use settings::{default_llm_endpoint, default_llm_model};
