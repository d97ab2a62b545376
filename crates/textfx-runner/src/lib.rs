//! textfx-runner - One task run from raw inputs to displayable outputs.

pub mod error;
pub mod runner;

pub use error::RunError;
pub use runner::run_task;
