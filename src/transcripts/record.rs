//! Transcript data model

use serde::Serialize;

/// A transcript as returned by the transcription service.
///
/// `text` is derived from `segments` once, at construction. There are no
/// setters; a newer transcript is a new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptRecord {
    id: String,
    date: String,
    segments: Vec<String>,
    text: String,
}

impl TranscriptRecord {
    /// Build a record, joining the segments with single spaces in order.
    pub fn new(id: impl Into<String>, date: impl Into<String>, segments: Vec<String>) -> Self {
        let text = segments.join(" ");
        Self {
            id: id.into(),
            date: date.into(),
            segments,
            text,
        }
    }

    /// Identifier assigned by the transcription service
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Service-supplied timestamp, unparsed
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Spoken sentences in conversation order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// All segments joined with single spaces
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the record carries any transcript text.
    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }
}
