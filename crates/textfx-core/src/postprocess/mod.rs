//! Task-specific cleanup of parsed outputs.
//!
//! Stages, in order: line handling, dedup, empty removal, one transform,
//! limit. Sentinel outputs pass through untouched.

mod filters;


use std::collections::HashSet;

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::outputs::Outputs;
use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineMode {
    /// Keep only the text before the first newline.
    #[default]
    FirstLine,
    /// Every line of every candidate becomes its own candidate.
    Flatten,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "delimiter", rename_all = "snake_case")]
pub enum DedupKey {
    #[default]
    Exact,
    CaseInsensitive,
    /// Compare the text before the first occurrence of the delimiter.
    BeforeDelimiter(char),
    /// Compare the text after the first occurrence of the delimiter.
    AfterDelimiter(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// Leave candidates as they are.
    #[default]
    None,
    /// Keep candidates containing the first input.
    RequireKeyword,
    /// Keep `ABC - Always Be Closing` style candidates whose initials spell
    /// the first input.
    VerifyAcronym,
    /// Keep candidates starting with the first letter of the second input.
    RequireInitial,
    /// Drop candidates that merely repeat an input.
    DropEcho,
    /// Remove the first input from the front of each candidate.
    StripInputPrefix,
    Shuffle,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cleanup {
    #[serde(default)]
    pub lines: LineMode,
    #[serde(default)]
    pub dedup: DedupKey,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default)]
    pub limit: Option<usize>,
}

static LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[-*•]|\d+[.)])\s+").expect("valid list marker regex"));

pub fn postprocess<S: AsRef<str>>(task: &Task, inputs: &[S], outputs: Outputs) -> Outputs {
    postprocess_with_rng(task, inputs, outputs, &mut rand::thread_rng())
}

pub fn postprocess_with_rng<S, R>(task: &Task, inputs: &[S], outputs: Outputs, rng: &mut R) -> Outputs
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let items = match outputs {
        Outputs::Results(items) => items,
        sentinel => return sentinel,
    };
    let cleanup = &task.cleanup;
    let received = items.len();

    let items = split_lines(items, cleanup.lines);
    let mut items = dedup(items, cleanup.dedup);
    items.retain(|item| !item.is_empty());

    let mut items = filters::apply(cleanup.transform, inputs, items, rng);
    items.retain(|item| !item.is_empty());
    let mut items = dedup(items, DedupKey::Exact);
    if let Some(limit) = cleanup.limit {
        items.truncate(limit);
    }

    log::debug!(
        "[{}] postprocess kept {} of {} candidates",
        task.id,
        items.len(),
        received
    );

    if items.is_empty() {
        Outputs::NoResults
    } else {
        Outputs::Results(items)
    }
}

fn split_lines(items: Vec<String>, mode: LineMode) -> Vec<String> {
    match mode {
        LineMode::FirstLine => items
            .iter()
            .map(|item| item.split('\n').next().unwrap_or("").trim().to_string())
            .collect(),
        LineMode::Flatten => items
            .iter()
            .flat_map(|item| item.lines())
            .map(|line| LIST_MARKER.replace(line, "").trim().to_string())
            .collect(),
    }
}

fn dedup_key(item: &str, key: DedupKey) -> String {
    match key {
        DedupKey::Exact => item.to_string(),
        DedupKey::CaseInsensitive => item.to_lowercase(),
        DedupKey::BeforeDelimiter(delimiter) => item
            .split(delimiter)
            .next()
            .unwrap_or(item)
            .trim()
            .to_string(),
        DedupKey::AfterDelimiter(delimiter) => item
            .split_once(delimiter)
            .map_or(item, |(_, after)| after)
            .trim()
            .to_string(),
    }
}

fn dedup(items: Vec<String>, key: DedupKey) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(dedup_key(item, key)))
        .collect()
}
