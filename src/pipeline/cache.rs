//! Single-slot transcript cache

use crate::transcripts::TranscriptRecord;

/// Holds at most one transcript for the lifetime of the process.
///
/// Starts empty and is only ever replaced wholesale; there is no way back to
/// empty.
#[derive(Debug, Default)]
pub struct PipelineCache {
    record: Option<TranscriptRecord>,
}

impl PipelineCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached record, if any fetch has succeeded yet.
    pub fn get(&self) -> Option<&TranscriptRecord> {
        self.record.as_ref()
    }

    /// The cached record only when it carries non-empty text.
    pub fn usable(&self) -> Option<&TranscriptRecord> {
        self.record.as_ref().filter(|r| r.has_text())
    }

    pub fn is_empty(&self) -> bool {
        self.record.is_none()
    }

    /// Swap in a new record, dropping whatever was there.
    pub fn replace(&mut self, record: TranscriptRecord) -> &TranscriptRecord {
        self.record.insert(record)
    }
}
