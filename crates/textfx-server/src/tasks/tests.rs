use std::fs;
use std::path::Path;

use textfx_core::{CuePolicy, DedupKey, LineMode, TaskRegistry, Transform};

use super::{TaskLoadError, TaskLoader};

const HAIKU_YAML: &str = r#"id: haiku
name: Haiku
description: Write a haiku about a topic.
input_labels: [Topic]
default_temperature: 0.6
components:
  preamble: Write a haiku for each topic.
  prefixes: ["Topic:", "Haiku:"]
  cue: omit
  examples:
    - ["autumn", "leaves fall / the wind keeps / none of them"]
cleanup:
  lines: first_line
  dedup:
    type: case_insensitive
  transform: drop_echo
  limit: 4
"#;

fn write_task(dir: &Path, name: &str, yaml: &str) {
    fs::write(dir.join(name), yaml).expect("should write task yaml");
}

#[test]
fn loads_a_task_file() {
    let dir = tempfile::tempdir().unwrap();
    write_task(dir.path(), "haiku.yaml", HAIKU_YAML);

    let task = TaskLoader::with_dir(dir.path())
        .load_from_file(dir.path().join("haiku.yaml"))
        .unwrap();

    assert_eq!(task.id, "haiku");
    assert_eq!(task.input_labels, vec!["Topic"]);
    assert_eq!(task.default_temperature, 0.6);
    assert_eq!(task.components.cue, CuePolicy::Omit);
    assert_eq!(task.components.delimiter, ':');
    assert_eq!(task.components.examples.len(), 1);
    assert_eq!(task.cleanup.lines, LineMode::FirstLine);
    assert_eq!(task.cleanup.dedup, DedupKey::CaseInsensitive);
    assert_eq!(task.cleanup.transform, Transform::DropEcho);
    assert_eq!(task.cleanup.limit, Some(4));
}

#[test]
fn minimal_file_gets_defaults() {
    let dir = tempfile::tempdir().unwrap();
    write_task(
        dir.path(),
        "echo.yml",
        "id: echo\nname: Echo\ninput_labels: [Word]\ncomponents:\n  prefixes: [\"Word:\", \"Echo:\"]\n",
    );

    let task = TaskLoader::with_dir(dir.path())
        .load_from_file(dir.path().join("echo.yml"))
        .unwrap();

    assert_eq!(task.description, "");
    assert_eq!(task.default_temperature, textfx_core::task::DEFAULT_TEMPERATURE);
    assert_eq!(task.components.cue, CuePolicy::Dangling);
    assert_eq!(task.cleanup, Default::default());
}

#[test]
fn invalid_definition_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_task(
        dir.path(),
        "broken.yaml",
        "id: broken\nname: Broken\ninput_labels: [A, B, C]\ncomponents:\n  prefixes: [\"A:\", \"B:\"]\n",
    );

    let err = TaskLoader::with_dir(dir.path())
        .load_from_file(dir.path().join("broken.yaml"))
        .unwrap_err();

    assert!(matches!(err, TaskLoadError::InvalidTask { .. }));
}

#[test]
fn load_all_only_reads_yaml_in_sorted_order() {
    let dir = tempfile::tempdir().unwrap();
    write_task(dir.path(), "b.yaml", HAIKU_YAML);
    write_task(dir.path(), "a.YML", &HAIKU_YAML.replace("id: haiku", "id: haiku-a"));
    write_task(dir.path(), "notes.txt", "not a task");
    write_task(dir.path(), "c.yaml", "id: [unclosed");

    let results = TaskLoader::with_dir(dir.path()).load_all().unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().id, "haiku-a");
    assert_eq!(results[1].as_ref().unwrap().id, "haiku");
    assert!(matches!(results[2], Err(TaskLoadError::Parse { .. })));
}

#[test]
fn missing_directory_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");

    let err = TaskLoader::with_dir(&missing).load_all().unwrap_err();
    assert!(matches!(err, TaskLoadError::DirectoryNotFound(_)));

    let mut registry = TaskRegistry::builtin();
    assert_eq!(TaskLoader::with_dir(&missing).load_into(&mut registry), 0);
    assert_eq!(registry.len(), 10);
}

#[test]
fn load_into_adds_overrides_and_skips_bad_files() {
    let dir = tempfile::tempdir().unwrap();
    write_task(dir.path(), "haiku.yaml", HAIKU_YAML);
    write_task(
        dir.path(),
        "simile.yaml",
        &HAIKU_YAML
            .replace("id: haiku", "id: simile")
            .replace("name: Haiku", "name: Custom Simile"),
    );
    write_task(dir.path(), "zzz.yaml", ": : not yaml");

    let mut registry = TaskRegistry::builtin();
    let loaded = TaskLoader::with_dir(dir.path()).load_into(&mut registry);

    assert_eq!(loaded, 2);
    assert_eq!(registry.len(), 11);
    assert_eq!(registry.get("simile").unwrap().name, "Custom Simile");
    assert!(registry.get("haiku").is_ok());
}
