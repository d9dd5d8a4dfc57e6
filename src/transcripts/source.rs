use async_trait::async_trait;

use crate::transcripts::TranscriptRecord;
use crate::Result;

/// A remote service that knows about recorded meetings.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the service's most recent transcript.
    ///
    /// `Ok(None)` means the service answered with an empty transcript list.
    /// Transport failures, error statuses and unexpected payloads come back
    /// as `Err`.
    async fn fetch_latest(&self) -> Result<Option<TranscriptRecord>>;
}
