use crate::completion::CompletionResponse;
use crate::error::FormatError;
use crate::outputs::Outputs;
use crate::prompt::{CuePolicy, PromptComponents};

/// Extracts the answer text from one raw candidate.
///
/// Everything from the first occurrence of the first prefix onwards is the
/// model starting another example and is dropped.
pub fn parse_candidate(output: &str, components: &PromptComponents) -> Result<String, FormatError> {
    let boundary = components.prefixes.first().map(String::as_str).unwrap_or("");
    let section = if boundary.is_empty() {
        output
    } else {
        output.split(boundary).next().unwrap_or("")
    };

    match components.cue {
        CuePolicy::Dangling => Ok(section.trim().to_string()),
        CuePolicy::Omit => section
            .split_once(components.delimiter)
            .map(|(_, value)| value.trim().to_string())
            .ok_or_else(|| FormatError::MissingDelimiter {
                delimiter: components.delimiter,
                section: section.to_string(),
            }),
    }
}

/// Turns a completion response into parsed outputs.
///
/// A single malformed candidate discards the whole batch.
pub fn parse_outputs(response: &CompletionResponse, components: &PromptComponents) -> Outputs {
    let candidates = match response {
        CompletionResponse::Error(error) => {
            log::warn!(
                "Completion failed with code {}: {}",
                error.code,
                error.message
            );
            return Outputs::Error;
        }
        CompletionResponse::Candidates(candidates) => candidates,
    };

    if candidates.is_empty() {
        log::debug!("Completion returned no candidates");
        return Outputs::NoResults;
    }

    let parsed: Result<Vec<String>, FormatError> = candidates
        .iter()
        .map(|candidate| parse_candidate(&candidate.output, components))
        .collect();

    match parsed {
        Ok(items) => Outputs::Results(items),
        Err(e) => {
            log::debug!("Discarding candidates: {}", e);
            Outputs::NoResults
        }
    }
}
