use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::config::Settings;
use crate::transcripts::{TranscriptRecord, TranscriptSource};
use crate::{PrdError, Result};

/// Fixed query: every transcript with its id, date and per-sentence text.
/// The service's own ordering decides which one is "latest".
const TRANSCRIPTS_QUERY: &str = "{ transcripts { id date sentences { text } } }";

pub struct FirefliesClient {
    http: Client,
    api_key: String,
    endpoint: String,
}

impl FirefliesClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.transcripts.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(PrdError::Config(
                "Fireflies API key is missing. Set transcripts.api_key in config or FIREFLIES_API_KEY."
                    .to_string(),
            ));
        }

        let endpoint = settings.transcripts.endpoint.trim().to_string();
        if endpoint.is_empty() {
            return Err(PrdError::Config(
                "transcripts.endpoint must not be empty".to_string(),
            ));
        }

        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(
                settings.transcripts.timeout_secs,
            ))
            .build()
            .map_err(|e| PrdError::Config(format!("Failed to build Fireflies HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key,
            endpoint,
        })
    }
}

#[async_trait]
impl TranscriptSource for FirefliesClient {
    async fn fetch_latest(&self) -> Result<Option<TranscriptRecord>> {
        info!("Fetching latest transcript from Fireflies");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&GraphQlRequest {
                query: TRANSCRIPTS_QUERY,
            })
            .send()
            .await
            .map_err(|e| {
                error!("Error fetching transcript: {}", e);
                PrdError::Transport(format!("Fireflies request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(
                "Failed to fetch data from Fireflies. Status Code: {}",
                status.as_u16()
            );
            return Err(PrdError::Transport(format!(
                "Fireflies returned status {}",
                status.as_u16()
            )));
        }

        let payload: GraphQlResponse = response.json().await.map_err(|e| {
            error!("Unexpected Fireflies response: {}", e);
            PrdError::Transport(format!("Failed to parse Fireflies response: {e}"))
        })?;

        let Some(data) = payload.data else {
            let reason = payload
                .errors
                .first()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| "response contained no data".to_string());
            error!("Fireflies query failed: {}", reason);
            return Err(PrdError::Transport(format!(
                "Fireflies query failed: {reason}"
            )));
        };

        let Some(latest) = data.transcripts.unwrap_or_default().into_iter().next() else {
            warn!("No transcripts found in Fireflies response");
            return Ok(None);
        };

        let segments = latest
            .sentences
            .unwrap_or_default()
            .into_iter()
            .map(|s| s.text)
            .collect();
        let record = TranscriptRecord::new(latest.id, render_date(latest.date), segments);

        info!("Successfully fetched transcript with ID: {}", record.id());
        Ok(Some(record))
    }
}

/// Fireflies reports `date` as epoch millis; keep whatever arrived as text.
fn render_date(date: Option<Value>) -> String {
    match date {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    }
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<TranscriptsData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct TranscriptsData {
    transcripts: Option<Vec<FirefliesTranscript>>,
}

#[derive(Debug, Deserialize)]
struct FirefliesTranscript {
    id: String,
    date: Option<Value>,
    sentences: Option<Vec<FirefliesSentence>>,
}

#[derive(Debug, Deserialize)]
struct FirefliesSentence {
    text: String,
}
