//! textfx-core - Core types and pure pipeline stages for textfx
//!
//! This crate provides everything in a run that does not touch the network:
//! - `prompt` - PromptComponents and prompt construction
//! - `completion` - request/response shapes of the text completion endpoint
//! - `parse` - turning raw candidates into parsed outputs
//! - `postprocess` - task-specific cleanup of parsed outputs
//! - `task` - the data-driven task table
//! - `config` - client configuration loading

pub mod completion;
pub mod config;
pub mod error;
pub mod outputs;
pub mod parse;
pub mod postprocess;
pub mod prompt;
pub mod task;

// Re-export commonly used types
pub use completion::{
    ApiError, Candidate, CompletionRequest, CompletionResponse, HarmCategory, HarmThreshold,
    SafetySetting,
};
pub use config::Config;
pub use error::{FormatError, PromptError, TaskError};
pub use outputs::{Outputs, ERROR_MESSAGE, NO_RESULTS_MESSAGE};
pub use parse::{parse_candidate, parse_outputs};
pub use postprocess::{postprocess, postprocess_with_rng, Cleanup, DedupKey, LineMode, Transform};
pub use prompt::{construct_prompt, CuePolicy, PromptComponents};
pub use task::{Task, TaskRegistry};
