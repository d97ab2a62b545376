//! Prompt construction.
//!
//! A prompt is a preamble line followed by labelled example tuples and the
//! live input tuple:
//!
//! ```text
//! Create a simile about a thing.
//! Object: the moon
//! Simile: The moon is like a pearl dropped into ink.
//! Object: a city at night
//! ```

use serde::{Deserialize, Serialize};

use crate::error::PromptError;

/// What to emit after the live input when it leaves prefixes unfilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CuePolicy {
    /// Emit the next unused prefix alone so the model continues that section.
    /// Candidates then start inside the open section.
    #[default]
    Dangling,
    /// Emit nothing; the model writes the next label itself and the parser
    /// cuts at the delimiter.
    Omit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptComponents {
    #[serde(default)]
    pub preamble: Option<String>,
    pub prefixes: Vec<String>,
    #[serde(default)]
    pub examples: Vec<Vec<String>>,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default)]
    pub cue: CuePolicy,
}

fn default_delimiter() -> char {
    ':'
}

impl PromptComponents {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            preamble: None,
            prefixes: prefixes.into_iter().map(Into::into).collect(),
            examples: Vec::new(),
            delimiter: default_delimiter(),
            cue: CuePolicy::default(),
        }
    }

    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = Some(preamble.into());
        self
    }

    pub fn with_example<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.examples
            .push(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_cue(mut self, cue: CuePolicy) -> Self {
        self.cue = cue;
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Checks the shape invariants: at least one prefix, and every example
    /// tuple as long as the prefix list.
    pub fn validate(&self) -> Result<(), PromptError> {
        if self.prefixes.is_empty() {
            return Err(PromptError::NoPrefixes);
        }
        for (index, example) in self.examples.iter().enumerate() {
            if example.len() != self.prefixes.len() {
                return Err(PromptError::ExampleArity {
                    index,
                    expected: self.prefixes.len(),
                    actual: example.len(),
                });
            }
        }
        Ok(())
    }
}

/// Assembles the prompt text for `live_input`.
pub fn construct_prompt<S: AsRef<str>>(
    components: &PromptComponents,
    live_input: &[S],
) -> Result<String, PromptError> {
    components.validate()?;
    let prefixes = &components.prefixes;
    if live_input.len() > prefixes.len() {
        return Err(PromptError::LiveInputTooLong {
            max: prefixes.len(),
            actual: live_input.len(),
        });
    }

    let mut lines: Vec<String> = Vec::new();
    if let Some(preamble) = components.preamble.as_deref().filter(|p| !p.is_empty()) {
        lines.push(preamble.to_string());
    }

    for example in &components.examples {
        push_tuple(&mut lines, prefixes, example);
    }
    push_tuple(&mut lines, prefixes, live_input);

    if components.cue == CuePolicy::Dangling {
        if let Some(next) = prefixes.get(live_input.len()).filter(|p| !p.is_empty()) {
            lines.push(next.clone());
        }
    }

    Ok(lines.join("\n"))
}

fn push_tuple<S: AsRef<str>>(lines: &mut Vec<String>, prefixes: &[String], values: &[S]) {
    for (prefix, value) in prefixes.iter().zip(values) {
        let value = value.as_ref();
        if prefix.is_empty() {
            lines.push(value.to_string());
        } else {
            lines.push(format!("{} {}", prefix, value));
        }
    }
}
