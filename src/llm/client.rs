use async_trait::async_trait;

use crate::config::Settings;
use crate::llm::openai::OpenAiClient;
use crate::{PrdError, Result};

/// Completion request payload: one system instruction, one user message.
pub struct CompletionRequest<'a> {
    pub system: &'a str,
    pub prompt: &'a str,
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Run a single completion and return the model's text unmodified.
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String>;
}

/// Build an LLM provider from runtime settings.
pub fn build_provider(settings: &Settings) -> Result<Box<dyn LlmProvider>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "openai" => Ok(Box::new(OpenAiClient::from_settings(settings)?)),
        other => Err(PrdError::Config(format!(
            "Unsupported llm.provider '{}'. Supported providers: openai",
            other
        ))),
    }
}
