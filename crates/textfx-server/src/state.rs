use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use textfx_core::{Config, TaskRegistry};
use textfx_llm::{CompletionClient, LLMError, PalmClient};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::tasks::TaskLoader;

pub struct AppState {
    pub client: Arc<dyn CompletionClient>,
    pub tasks: Arc<TaskRegistry>,
    /// In-flight runs by run id.
    pub cancel_tokens: Arc<RwLock<HashMap<String, ActiveRun>>>,
    next_generation: AtomicU64,
}

#[derive(Debug, Clone)]
pub struct ActiveRun {
    /// Distinguishes runs that reuse the same id.
    pub generation: u64,
    pub token: CancellationToken,
}

/// Registration of one in-flight run. Dropping it removes the entry, unless
/// the entry already belongs to a newer run with the same id.
pub struct RunGuard {
    runs: Arc<RwLock<HashMap<String, ActiveRun>>>,
    run_id: String,
    generation: u64,
    token: CancellationToken,
}

impl RunGuard {
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

fn remove_if_current(runs: &mut HashMap<String, ActiveRun>, run_id: &str, generation: u64) {
    if runs.get(run_id).is_some_and(|run| run.generation == generation) {
        runs.remove(run_id);
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        if let Ok(mut runs) = self.runs.try_write() {
            remove_if_current(&mut runs, &self.run_id, self.generation);
            return;
        }
        let runs = Arc::clone(&self.runs);
        let run_id = std::mem::take(&mut self.run_id);
        let generation = self.generation;
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    remove_if_current(&mut *runs.write().await, &run_id, generation);
                });
            }
            Err(_) => log::warn!("[{}] Run entry left behind: no runtime to remove it", run_id),
        }
    }
}

impl AppState {
    /// Builds the completion client from `config` and registers built-in
    /// tasks plus any task files found in `tasks_dir`.
    pub fn new_with_config(config: &Config, tasks_dir: Option<&Path>) -> Result<Self, LLMError> {
        log::info!(
            "Creating completion client with base URL: {} and model: {}",
            config.api_base,
            config.model
        );
        let client: Arc<dyn CompletionClient> = Arc::new(PalmClient::new(config)?);

        let mut tasks = TaskRegistry::builtin();
        if let Some(dir) = tasks_dir {
            let loaded = TaskLoader::with_dir(dir).load_into(&mut tasks);
            if loaded > 0 {
                log::info!("Loaded {} task files from {}", loaded, dir.display());
            }
        }
        for task in tasks.iter() {
            log::debug!("  - {}: {}", task.id, task.name);
        }

        Ok(Self::with_client(client, tasks))
    }

    pub fn with_client(client: Arc<dyn CompletionClient>, tasks: TaskRegistry) -> Self {
        Self {
            client,
            tasks: Arc::new(tasks),
            cancel_tokens: Arc::new(RwLock::new(HashMap::new())),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Registers a run. Returns `None` when `run_id` is already in flight.
    pub async fn begin_run(&self, run_id: &str) -> Option<RunGuard> {
        let mut runs = self.cancel_tokens.write().await;
        if runs.contains_key(run_id) {
            return None;
        }
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();
        runs.insert(
            run_id.to_string(),
            ActiveRun {
                generation,
                token: token.clone(),
            },
        );
        Some(RunGuard {
            runs: Arc::clone(&self.cancel_tokens),
            run_id: run_id.to_string(),
            generation,
            token,
        })
    }

    /// Cancels an in-flight run. Returns false when no such run exists.
    pub async fn cancel_run(&self, run_id: &str) -> bool {
        match self.cancel_tokens.write().await.remove(run_id) {
            Some(run) => {
                run.token.cancel();
                true
            }
            None => false,
        }
    }
}
