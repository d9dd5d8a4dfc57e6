//! Fetch/generate orchestration

use tracing::{error, info};

use crate::config::Settings;
use crate::llm::prompts::{build_prd_prompt, PRD_SYSTEM_PROMPT};
use crate::llm::{build_provider, CompletionRequest, LlmProvider};
use crate::pipeline::cache::PipelineCache;
use crate::transcripts::{FirefliesClient, TranscriptRecord, TranscriptSource};
use crate::{PrdError, Result};

/// Turns the latest transcript into a PRD.
///
/// The pipeline is the only owner of the transcript cache. Both operations
/// take `&mut self`: `fetch_and_cache` always writes the cache, and
/// `generate` writes it too when it has to fall back to a fetch.
pub struct DocumentPipeline {
    source: Box<dyn TranscriptSource>,
    provider: Box<dyn LlmProvider>,
    cache: PipelineCache,
}

impl DocumentPipeline {
    pub fn new(source: Box<dyn TranscriptSource>, provider: Box<dyn LlmProvider>) -> Self {
        Self {
            source,
            provider,
            cache: PipelineCache::new(),
        }
    }

    /// Build the Fireflies + configured LLM pipeline.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let source = FirefliesClient::from_settings(settings)?;
        let provider = build_provider(settings)?;
        Ok(Self::new(Box::new(source), provider))
    }

    /// Read-only view of the cache.
    pub fn cache(&self) -> &PipelineCache {
        &self.cache
    }

    /// Fetch the latest transcript and overwrite the cache with it.
    ///
    /// On failure the cache is left exactly as it was, so an older transcript
    /// stays available to `generate`.
    pub async fn fetch_and_cache(&mut self) -> Result<&TranscriptRecord> {
        let record = self.source.fetch_latest().await?.ok_or_else(|| {
            PrdError::EmptyResult("transcript list was empty".to_string())
        })?;

        Ok(self.cache.replace(record))
    }

    /// Generate a PRD from the cached transcript.
    ///
    /// Uses the cached text when it is non-empty. Otherwise performs one
    /// `fetch_and_cache` (which mutates the cache on success); if that fails
    /// the model is never called and `NoCachedInput` is returned.
    ///
    /// The model output is returned exactly as received.
    pub async fn generate(&mut self) -> Result<String> {
        let transcript = match self.cache.usable() {
            Some(record) => {
                info!("Using existing transcript with ID: {}", record.id());
                record.text().to_string()
            }
            None => {
                info!("No transcript in memory, fetching a new one");
                match self.fetch_and_cache().await {
                    Ok(record) => record.text().to_string(),
                    Err(e) => {
                        error!("Failed to fetch transcript for PRD generation: {}", e);
                        return Err(PrdError::NoCachedInput(Box::new(e)));
                    }
                }
            }
        };

        info!("Generating PRD from transcript");
        let prompt = build_prd_prompt(&transcript);
        let document = self
            .provider
            .complete(CompletionRequest {
                system: PRD_SYSTEM_PROMPT,
                prompt: &prompt,
            })
            .await
            .map_err(|e| {
                error!("Error generating PRD: {}", e);
                e
            })?;

        info!("Successfully generated PRD from transcript");
        Ok(document)
    }
}
