use textfx_core::{PromptError, TaskError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RunError {
    #[error(transparent)]
    Task(#[from] TaskError),

    #[error("Prompt construction failed: {0}")]
    Prompt(#[from] PromptError),

    #[error("Temperature {0} is outside [0, 1]")]
    InvalidTemperature(f32),

    #[error("Run cancelled")]
    Cancelled,
}

impl RunError {
    /// Errors caused by what the caller sent rather than by the run itself.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            RunError::Task(TaskError::InputCount { .. })
                | RunError::Task(TaskError::EmptyInput { .. })
                | RunError::Prompt(_)
                | RunError::InvalidTemperature(_)
        )
    }
}
