//! The task table.
//!
//! A task is data: prompt components plus a cleanup recipe. Nothing in the
//! pipeline branches on a task id.

mod builtin;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{PromptError, TaskError};
use crate::outputs::Outputs;
use crate::postprocess::{postprocess, Cleanup};
use crate::prompt::{construct_prompt, PromptComponents};

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// One label per live input, in prompt order.
    pub input_labels: Vec<String>,
    pub components: PromptComponents,
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,
    #[serde(default)]
    pub cleanup: Cleanup,
}

impl Task {
    pub fn validate(&self) -> Result<(), TaskError> {
        if self.id.trim().is_empty() {
            return Err(TaskError::InvalidDefinition("task id is empty".to_string()));
        }
        self.components
            .validate()
            .map_err(|e| TaskError::InvalidDefinition(format!("{}: {}", self.id, e)))?;
        if self.input_labels.is_empty() || self.input_labels.len() > self.components.prefixes.len()
        {
            return Err(TaskError::InvalidDefinition(format!(
                "{}: {} input labels for {} prefixes",
                self.id,
                self.input_labels.len(),
                self.components.prefixes.len()
            )));
        }
        if !(0.0..=1.0).contains(&self.default_temperature) {
            return Err(TaskError::InvalidDefinition(format!(
                "{}: default temperature {} outside [0, 1]",
                self.id, self.default_temperature
            )));
        }
        Ok(())
    }

    /// Inputs must match the declared labels one to one and not be blank.
    pub fn check_inputs<S: AsRef<str>>(&self, inputs: &[S]) -> Result<(), TaskError> {
        if inputs.len() != self.input_labels.len() {
            return Err(TaskError::InputCount {
                task: self.id.clone(),
                expected: self.input_labels.len(),
                actual: inputs.len(),
            });
        }
        for (input, label) in inputs.iter().zip(&self.input_labels) {
            if input.as_ref().trim().is_empty() {
                return Err(TaskError::EmptyInput {
                    task: self.id.clone(),
                    label: label.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn prompt<S: AsRef<str>>(&self, inputs: &[S]) -> Result<String, PromptError> {
        let trimmed: Vec<&str> = inputs.iter().map(|s| s.as_ref().trim()).collect();
        construct_prompt(&self.components, &trimmed)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    tasks: BTreeMap<String, Task>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in tasks.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for task in builtin::tasks() {
            registry.tasks.insert(task.id.clone(), task);
        }
        registry
    }

    /// Adds or replaces a task, returning the one it replaced.
    pub fn insert(&mut self, task: Task) -> Result<Option<Task>, TaskError> {
        task.validate()?;
        Ok(self.tasks.insert(task.id.clone(), task))
    }

    pub fn get(&self, id: &str) -> Result<&Task, TaskError> {
        self.tasks
            .get(id)
            .ok_or_else(|| TaskError::UnknownTask(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Postprocesses `outputs` with the cleanup recipe registered for `task_id`.
    pub fn postprocess<S: AsRef<str>>(
        &self,
        task_id: &str,
        inputs: &[S],
        outputs: Outputs,
    ) -> Result<Outputs, TaskError> {
        let task = self.get(task_id)?;
        Ok(postprocess(task, inputs, outputs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::CuePolicy;

    #[test]
    fn builtin_tasks_are_valid() {
        let registry = TaskRegistry::builtin();
        assert_eq!(registry.len(), 10);
        for task in registry.iter() {
            task.validate().unwrap_or_else(|e| panic!("{}: {}", task.id, e));
        }
    }

    #[test]
    fn builtin_prompts_end_with_live_input() {
        let registry = TaskRegistry::builtin();
        let simile = registry.get("simile").unwrap();
        let prompt = simile.prompt(&["  a thunderstorm "]).unwrap();
        assert!(prompt.ends_with("Object: a thunderstorm"));
        assert_eq!(simile.components.cue, CuePolicy::Omit);

        let fuse = registry.get("fuse").unwrap();
        let prompt = fuse.prompt(&["a river", "a library"]).unwrap();
        assert!(prompt.ends_with("Thing 1: a river\nThing 2: a library"));
    }

    #[test]
    fn unknown_task_is_an_error() {
        let registry = TaskRegistry::builtin();
        assert_eq!(
            registry.get("nope").unwrap_err(),
            TaskError::UnknownTask("nope".to_string())
        );
        assert!(registry
            .postprocess("nope", &["x"], Outputs::NoResults)
            .is_err());
    }

    #[test]
    fn check_inputs_enforces_count_and_content() {
        let registry = TaskRegistry::builtin();
        let alliteration = registry.get("alliteration").unwrap();

        assert!(alliteration.check_inputs(&["coffee", "b"]).is_ok());
        assert!(matches!(
            alliteration.check_inputs(&["coffee"]),
            Err(TaskError::InputCount {
                expected: 2,
                actual: 1,
                ..
            })
        ));
        assert!(matches!(
            alliteration.check_inputs(&["coffee", "  "]),
            Err(TaskError::EmptyInput { .. })
        ));
    }

    #[test]
    fn insert_validates_and_replaces() {
        let mut registry = TaskRegistry::builtin();
        let mut custom = registry.get("simile").unwrap().clone();
        custom.name = "Simile (custom)".to_string();

        let replaced = registry.insert(custom).unwrap();
        assert_eq!(replaced.map(|t| t.name), Some("Simile".to_string()));
        assert_eq!(registry.get("simile").unwrap().name, "Simile (custom)");

        let mut broken = registry.get("simile").unwrap().clone();
        broken.id = "broken".to_string();
        broken.default_temperature = 1.5;
        assert!(matches!(
            registry.insert(broken),
            Err(TaskError::InvalidDefinition(_))
        ));
    }
}
