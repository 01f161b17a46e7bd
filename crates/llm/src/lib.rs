//! LLM client for tab group naming

mod ai_types;
mod client;
mod error;
mod namer;

pub use ai_types::CompletionRequest;
pub use client::{LlmClient, truncate};
pub use error::LlmError;
pub use namer::{GroupNamer, LlmGroupNamer, clean_generated_name, naming_prompt};
