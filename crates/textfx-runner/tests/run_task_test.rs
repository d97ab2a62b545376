use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use textfx_core::{
    ApiError, Candidate, CompletionResponse, Outputs, TaskError, TaskRegistry,
};
use textfx_llm::CompletionClient;
use textfx_runner::{run_task, RunError};
use tokio_util::sync::CancellationToken;

/// Returns a fixed response and records what it was asked.
struct MockCompletionClient {
    response: CompletionResponse,
    calls: Mutex<Vec<(String, f32)>>,
}

impl MockCompletionClient {
    fn with_outputs(outputs: &[&str]) -> Self {
        Self::new(CompletionResponse::Candidates(
            outputs
                .iter()
                .map(|o| Candidate {
                    output: o.to_string(),
                })
                .collect(),
        ))
    }

    fn new(response: CompletionResponse) -> Self {
        Self {
            response,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(String, f32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn predict(&self, prompt: &str, temperature: f32) -> CompletionResponse {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), temperature));
        self.response.clone()
    }
}

/// Never answers.
struct HangingClient;

#[async_trait]
impl CompletionClient for HangingClient {
    async fn predict(&self, _prompt: &str, _temperature: f32) -> CompletionResponse {
        std::future::pending().await
    }
}

#[tokio::test]
async fn test_simile_run_end_to_end() {
    let registry = TaskRegistry::builtin();
    let task = registry.get("simile").unwrap();
    let client = MockCompletionClient::with_outputs(&[
        "\nSimile: A thunderstorm is like a drum solo in the sky.\nObject: rain",
        "\nSimile: A thunderstorm is like an angry orchestra.",
        "\nSimile: A thunderstorm is like a drum solo in the sky.",
    ]);

    let outputs = run_task(&client, task, &[" a thunderstorm "], None, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        outputs,
        Outputs::Results(vec![
            "A thunderstorm is like a drum solo in the sky.".to_string(),
            "A thunderstorm is like an angry orchestra.".to_string(),
        ])
    );

    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].0.ends_with("Object: a thunderstorm"));
    assert_eq!(calls[0].1, task.default_temperature);
}

#[tokio::test]
async fn test_explicit_temperature_is_forwarded() {
    let registry = TaskRegistry::builtin();
    let task = registry.get("unfold").unwrap();
    let client = MockCompletionClient::with_outputs(&["\nUnfolded: limelight"]);

    let outputs = run_task(&client, task, &["light"], Some(0.2), CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outputs, Outputs::Results(vec!["limelight".to_string()]));
    assert_eq!(client.calls()[0].1, 0.2);
}

#[tokio::test]
async fn test_endpoint_error_is_error_sentinel() {
    let registry = TaskRegistry::builtin();
    let task = registry.get("simile").unwrap();
    let client = MockCompletionClient::new(CompletionResponse::Error(ApiError {
        code: 500,
        message: "boom".to_string(),
        http_status_code: Some(500),
    }));

    let outputs = run_task(&client, task, &["rain"], None, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outputs, Outputs::Error);
}

#[tokio::test]
async fn test_malformed_candidate_is_no_results() {
    let registry = TaskRegistry::builtin();
    let task = registry.get("simile").unwrap();
    let client = MockCompletionClient::with_outputs(&["\nSimile: fine", "no delimiter here"]);

    let outputs = run_task(&client, task, &["rain"], None, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outputs, Outputs::NoResults);
}

#[tokio::test]
async fn test_invalid_inputs_never_reach_the_client() {
    let registry = TaskRegistry::builtin();
    let fuse = registry.get("fuse").unwrap();
    let client = MockCompletionClient::with_outputs(&["\nIntersection: both"]);

    let err = run_task(&client, fuse, &["a river"], None, CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RunError::Task(TaskError::InputCount {
            expected: 2,
            actual: 1,
            ..
        })
    ));
    assert!(err.is_invalid_input());

    let err = run_task(&client, fuse, &["a river", " "], None, CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, RunError::Task(TaskError::EmptyInput { .. })));

    let err = run_task(&client, fuse, &["a", "b"], Some(1.5), CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err, RunError::InvalidTemperature(1.5));

    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_cancel_while_waiting() {
    let registry = TaskRegistry::builtin();
    let task = registry.get("scene").unwrap();
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        run_task(&HangingClient, task, &["a street"], None, cancel),
    )
    .await
    .expect("run should stop once cancelled");

    assert_eq!(result, Err(RunError::Cancelled));
}

#[tokio::test]
async fn test_already_cancelled_skips_predict() {
    let registry = TaskRegistry::builtin();
    let task = registry.get("simile").unwrap();
    let client = MockCompletionClient::with_outputs(&["\nSimile: x"]);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = run_task(&client, task, &["rain"], None, cancel).await;

    assert_eq!(result, Err(RunError::Cancelled));
    assert!(client.calls().is_empty());
}
