//! LLM module for prdgen
//!
//! Handles PRD generation through a chat-completion API.

mod client;
mod openai;
pub mod prompts;

pub use client::{build_provider, CompletionRequest, LlmProvider};
pub use openai::OpenAiClient;
