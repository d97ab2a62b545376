use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    #[error("Prompt components must declare at least one prefix")]
    NoPrefixes,

    #[error("Example {index} has {actual} values but there are {expected} prefixes")]
    ExampleArity {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Live input has {actual} values but only {max} prefixes are declared")]
    LiveInputTooLong { max: usize, actual: usize },
}

/// A candidate did not have the labelled-section shape the parser expects.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("No '{delimiter}' delimiter in candidate section: {section:?}")]
    MissingDelimiter { delimiter: char, section: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("Unknown task: {0}")]
    UnknownTask(String),

    #[error("Task {task} expects {expected} inputs, got {actual}")]
    InputCount {
        task: String,
        expected: usize,
        actual: usize,
    },

    #[error("Task {task} input '{label}' must not be empty")]
    EmptyInput { task: String, label: String },

    #[error("Invalid task definition: {0}")]
    InvalidDefinition(String),
}
