//! Document pipeline for prdgen
//!
//! Owns the single cached transcript and drives PRD generation from it.

mod cache;
mod document;
mod payload;

pub use cache::PipelineCache;
pub use document::DocumentPipeline;
pub use payload::{FetchPayload, GeneratedDocument};
