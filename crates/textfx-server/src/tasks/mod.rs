//! Task definitions loaded from YAML files.
//!
//! One task per `*.yaml`/`*.yml` file. A file whose id matches a built-in
//! replaces it.

mod loader;

#[cfg(test)]
mod tests;

use std::io;
use std::path::{Path, PathBuf};

use textfx_core::{Task, TaskError, TaskRegistry};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskLoadError {
    #[error("task directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("I/O error for {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to parse task {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid task in {}: {source}", path.display())]
    InvalidTask { path: PathBuf, source: TaskError },
}

pub struct TaskLoader {
    tasks_dir: PathBuf,
}

impl TaskLoader {
    /// Loader for `~/.textfx/tasks`.
    pub fn new() -> Self {
        let home = dirs::home_dir().unwrap_or_else(std::env::temp_dir);
        Self::with_dir(home.join(".textfx").join("tasks"))
    }

    pub fn with_dir(path: impl Into<PathBuf>) -> Self {
        Self {
            tasks_dir: path.into(),
        }
    }

    pub fn tasks_dir(&self) -> &Path {
        &self.tasks_dir
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<Task, TaskLoadError> {
        loader::load_from_file(path.as_ref())
    }

    /// Every task file in the directory, sorted by path. Per-file failures
    /// are returned alongside the successes.
    pub fn load_all(&self) -> Result<Vec<Result<Task, TaskLoadError>>, TaskLoadError> {
        loader::load_all_from_directory(&self.tasks_dir)
    }

    /// Registers every valid task file and returns how many were added.
    /// Unreadable or invalid files are logged and skipped.
    pub fn load_into(&self, registry: &mut TaskRegistry) -> usize {
        let results = match self.load_all() {
            Ok(results) => results,
            Err(TaskLoadError::DirectoryNotFound(path)) => {
                log::debug!("No task directory at {}", path.display());
                return 0;
            }
            Err(e) => {
                log::warn!("Skipping task files: {}", e);
                return 0;
            }
        };

        let mut loaded = 0;
        for result in results {
            let task = match result {
                Ok(task) => task,
                Err(e) => {
                    log::warn!("Skipping {}", e);
                    continue;
                }
            };
            let id = task.id.clone();
            match registry.insert(task) {
                Ok(Some(_)) => {
                    log::info!("Task file overrides built-in task {}", id);
                    loaded += 1;
                }
                Ok(None) => loaded += 1,
                Err(e) => log::warn!("Skipping task {}: {}", id, e),
            }
        }
        loaded
    }
}

impl Default for TaskLoader {
    fn default() -> Self {
        Self::new()
    }
}
