//! LLM module for textsum
//!
//! Talks to the local model server and unwraps its response envelope.

mod client;
mod envelope;
mod ollama;
mod prompts;

pub use client::{build_backend, GenerateRequest, ModelBackend, ModelError};
pub use envelope::Envelope;
pub use ollama::OllamaClient;
pub use prompts::{build_summary_prompt, SUMMARY_INSTRUCTION};
