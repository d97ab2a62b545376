//! textfx-llm - Text completion client
//!
//! `CompletionClient` is the seam between the pipeline and the model;
//! `PalmClient` talks to the Generative Language `generateText` endpoint.

pub mod provider;
pub mod providers;

pub use provider::{CompletionClient, LLMError, Result};
pub use providers::palm::PalmClient;
