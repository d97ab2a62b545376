use textfx_core::{parse_outputs, postprocess, Outputs, Task};
use textfx_llm::CompletionClient;
use tokio_util::sync::CancellationToken;

use crate::error::RunError;

pub type Result<T> = std::result::Result<T, RunError>;

/// Runs `task` once: builds the prompt, predicts, parses and postprocesses.
///
/// `temperature` falls back to the task default. Endpoint and format
/// failures come back as sentinel [`Outputs`]; only bad input and
/// cancellation are errors.
pub async fn run_task<S: AsRef<str>>(
    client: &dyn CompletionClient,
    task: &Task,
    inputs: &[S],
    temperature: Option<f32>,
    cancel: CancellationToken,
) -> Result<Outputs> {
    task.check_inputs(inputs)?;
    let temperature = temperature.unwrap_or(task.default_temperature);
    if !(0.0..=1.0).contains(&temperature) {
        return Err(RunError::InvalidTemperature(temperature));
    }

    let inputs: Vec<&str> = inputs.iter().map(|s| s.as_ref().trim()).collect();
    let prompt = task.prompt(&inputs)?;
    log::debug!(
        "[{}] Prompt built ({} chars), temperature {}",
        task.id,
        prompt.len(),
        temperature
    );

    if cancel.is_cancelled() {
        return Err(RunError::Cancelled);
    }

    let response = tokio::select! {
        _ = cancel.cancelled() => {
            log::info!("[{}] Run cancelled while waiting for completion", task.id);
            return Err(RunError::Cancelled);
        }
        response = client.predict(&prompt, temperature) => response,
    };

    let parsed = parse_outputs(&response, &task.components);
    log::debug!("[{}] Parsed outputs: {}", task.id, parsed.status());

    let outputs = postprocess(task, &inputs, parsed);
    log::debug!(
        "[{}] Run finished: {} ({} results)",
        task.id,
        outputs.status(),
        outputs.results().len()
    );
    Ok(outputs)
}
