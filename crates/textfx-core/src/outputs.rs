use serde::{Deserialize, Serialize};

/// Shown in place of results when the completion endpoint failed.
pub const ERROR_MESSAGE: &str = "An internal error occurred. Please try again.";

/// Shown in place of results when nothing usable came back.
pub const NO_RESULTS_MESSAGE: &str = "No results. Try a different input or temperature.";

/// Result of one run as it travels through the parser and postprocessor.
///
/// The two sentinel variants replace the placeholder strings a UI would
/// otherwise have to sniff for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "results", rename_all = "snake_case")]
pub enum Outputs {
    Results(Vec<String>),
    NoResults,
    Error,
}

impl Outputs {
    pub fn is_sentinel(&self) -> bool {
        !matches!(self, Outputs::Results(_))
    }

    pub fn status(&self) -> &'static str {
        match self {
            Outputs::Results(_) => "results",
            Outputs::NoResults => "no_results",
            Outputs::Error => "error",
        }
    }

    pub fn results(&self) -> &[String] {
        match self {
            Outputs::Results(items) => items,
            _ => &[],
        }
    }

    /// Lines a UI renders: the results, or a single sentinel message.
    pub fn display_lines(&self) -> Vec<String> {
        match self {
            Outputs::Results(items) => items.clone(),
            Outputs::NoResults => vec![NO_RESULTS_MESSAGE.to_string()],
            Outputs::Error => vec![ERROR_MESSAGE.to_string()],
        }
    }
}
