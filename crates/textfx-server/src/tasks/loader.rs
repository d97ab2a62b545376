use std::fs;
use std::path::Path;

use textfx_core::Task;

use super::TaskLoadError;

pub(super) fn load_from_file(path: &Path) -> Result<Task, TaskLoadError> {
    let content = fs::read_to_string(path).map_err(|source| TaskLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let task: Task = serde_yaml::from_str(&content).map_err(|source| TaskLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    task.validate().map_err(|source| TaskLoadError::InvalidTask {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(task)
}

pub(super) fn load_all_from_directory(
    dir: &Path,
) -> Result<Vec<Result<Task, TaskLoadError>>, TaskLoadError> {
    if !dir.exists() {
        return Err(TaskLoadError::DirectoryNotFound(dir.to_path_buf()));
    }

    if !dir.is_dir() {
        return Err(TaskLoadError::NotADirectory(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|source| TaskLoadError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut yaml_paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| TaskLoadError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = entry.path();
        if path.is_file() && is_yaml_file(&path) {
            yaml_paths.push(path);
        }
    }

    yaml_paths.sort();

    Ok(yaml_paths.iter().map(|path| load_from_file(path)).collect())
}

fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            ext == "yaml" || ext == "yml"
        })
        .unwrap_or(false)
}
