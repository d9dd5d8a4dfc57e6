//! Transcripts module for prdgen
//!
//! Retrieves the most recent meeting transcript and normalizes it into a
//! [`TranscriptRecord`].

mod fireflies;
mod record;
mod source;

pub use fireflies::FirefliesClient;
pub use record::TranscriptRecord;
pub use source::TranscriptSource;
