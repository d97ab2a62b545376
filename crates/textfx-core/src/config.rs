use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::completion::{DEFAULT_CANDIDATE_COUNT, DEFAULT_MAX_OUTPUT_TOKENS};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta2";
pub const DEFAULT_MODEL: &str = "text-bison-001";

const CONFIG_FILE_PATH: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub http_proxy: String,
    #[serde(default)]
    pub https_proxy: String,
    #[serde(default = "default_candidate_count")]
    pub candidate_count: u32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// Extra attempts on transient failures. Zero means a single attempt.
    #[serde(default)]
    pub max_retries: u32,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_candidate_count() -> u32 {
    DEFAULT_CANDIDATE_COUNT
}

fn default_max_output_tokens() -> u32 {
    DEFAULT_MAX_OUTPUT_TOKENS
}

fn textfx_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
        .join(".textfx")
}

fn textfx_config_json_path() -> PathBuf {
    textfx_dir().join("config.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: default_api_base(),
            model: default_model(),
            http_proxy: String::new(),
            https_proxy: String::new(),
            candidate_count: DEFAULT_CANDIDATE_COUNT,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            max_retries: 0,
            timeout_secs: None,
        }
    }
}

impl Config {
    /// `~/.textfx/config.json`, else `./config.toml`, then environment overrides.
    pub fn new() -> Self {
        Self::load_from(
            &textfx_config_json_path(),
            Path::new(CONFIG_FILE_PATH),
            |key| std::env::var(key).ok(),
        )
    }

    pub fn load_from<F>(json_path: &Path, toml_path: &Path, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::read_json(json_path)
            .or_else(|| Self::read_toml(toml_path))
            .unwrap_or_default();
        config.reset_zero_counts();
        config.apply_env(env);
        config
    }

    /// Candidate and token counts of 0 would make every request useless.
    fn reset_zero_counts(&mut self) {
        if self.candidate_count == 0 {
            log::warn!("Ignoring candidate_count=0: must be at least 1");
            self.candidate_count = DEFAULT_CANDIDATE_COUNT;
        }
        if self.max_output_tokens == 0 {
            log::warn!("Ignoring max_output_tokens=0: must be at least 1");
            self.max_output_tokens = DEFAULT_MAX_OUTPUT_TOKENS;
        }
    }

    fn read_json(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Ignoring invalid config {}: {}", path.display(), e);
                None
            }
        }
    }

    fn read_toml(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Ignoring invalid config {}: {}", path.display(), e);
                None
            }
        }
    }

    fn apply_env<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = env("API_KEY") {
            self.api_key = Some(api_key);
        }
        if let Some(api_base) = env("API_BASE") {
            self.api_base = api_base;
        }
        if let Some(model) = env("MODEL") {
            self.model = model;
        }
        if let Some(http_proxy) = env("HTTP_PROXY") {
            self.http_proxy = http_proxy;
        }
        if let Some(https_proxy) = env("HTTPS_PROXY") {
            self.https_proxy = https_proxy;
        }
        if let Some(count) = parse_positive_env(&env, "TEXTFX_CANDIDATE_COUNT") {
            self.candidate_count = count;
        }
        if let Some(tokens) = parse_positive_env(&env, "TEXTFX_MAX_OUTPUT_TOKENS") {
            self.max_output_tokens = tokens;
        }
        if let Some(retries) = parse_env(&env, "TEXTFX_MAX_RETRIES") {
            self.max_retries = retries;
        }
        if let Some(secs) = parse_env(&env, "TEXTFX_TIMEOUT_SECS") {
            self.timeout_secs = Some(secs);
        }
    }
}

fn parse_env<F, T>(env: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = env(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring {}={:?}: not a number", key, raw);
            None
        }
    }
}

fn parse_positive_env<F>(env: &F, key: &str) -> Option<u32>
where
    F: Fn(&str) -> Option<String>,
{
    match parse_env(env, key)? {
        0 => {
            log::warn!("Ignoring {}=0: must be at least 1", key);
            None
        }
        value => Some(value),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_when_nothing_is_present() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(
            &dir.path().join("config.json"),
            &dir.path().join("config.toml"),
            no_env,
        );
        assert_eq!(config, Config::default());
        assert_eq!(config.model, "text-bison-001");
        assert_eq!(config.candidate_count, 8);
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn json_wins_over_toml() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("config.json");
        let toml_path = dir.path().join("config.toml");
        std::fs::write(&json, r#"{"api_key": "from-json", "model": "json-model"}"#).unwrap();
        std::fs::write(&toml_path, "api_key = \"from-toml\"\n").unwrap();

        let config = Config::load_from(&json, &toml_path, no_env);
        assert_eq!(config.api_key.as_deref(), Some("from-json"));
        assert_eq!(config.model, "json-model");
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn falls_back_to_toml_when_json_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("config.json");
        let toml_path = dir.path().join("config.toml");
        std::fs::write(&json, "{not json").unwrap();
        std::fs::write(&toml_path, "api_key = \"from-toml\"\nmax_retries = 2\n").unwrap();

        let config = Config::load_from(&json, &toml_path, no_env);
        assert_eq!(config.api_key.as_deref(), Some("from-toml"));
        assert_eq!(config.max_retries, 2);
    }

    #[test]
    fn env_overrides_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("config.toml");
        std::fs::write(&toml_path, "api_key = \"file\"\ncandidate_count = 4\n").unwrap();

        let env: HashMap<&str, &str> = [
            ("API_KEY", "env-key"),
            ("MODEL", "env-model"),
            ("HTTPS_PROXY", "http://proxy:8080"),
            ("TEXTFX_CANDIDATE_COUNT", "3"),
            ("TEXTFX_MAX_OUTPUT_TOKENS", "not-a-number"),
            ("TEXTFX_TIMEOUT_SECS", "30"),
        ]
        .into_iter()
        .collect();

        let config = Config::load_from(&dir.path().join("missing.json"), &toml_path, |key| {
            env.get(key).map(|v| v.to_string())
        });
        assert_eq!(config.api_key.as_deref(), Some("env-key"));
        assert_eq!(config.model, "env-model");
        assert_eq!(config.https_proxy, "http://proxy:8080");
        assert_eq!(config.candidate_count, 3);
        assert_eq!(config.max_output_tokens, DEFAULT_MAX_OUTPUT_TOKENS);
        assert_eq!(config.timeout_secs, Some(30));
    }

    #[test]
    fn zero_counts_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("config.json");
        std::fs::write(&json, r#"{"candidate_count": 0, "max_output_tokens": 0}"#).unwrap();

        let config = Config::load_from(&json, &dir.path().join("config.toml"), no_env);
        assert_eq!(config.candidate_count, DEFAULT_CANDIDATE_COUNT);
        assert_eq!(config.max_output_tokens, DEFAULT_MAX_OUTPUT_TOKENS);

        let toml_path = dir.path().join("config.toml");
        std::fs::write(&toml_path, "candidate_count = 0
max_output_tokens = 64
").unwrap();
        let env: HashMap<&str, &str> = [
            ("TEXTFX_CANDIDATE_COUNT", "0"),
            ("TEXTFX_MAX_OUTPUT_TOKENS", "0"),
        ]
        .into_iter()
        .collect();

        let config = Config::load_from(&dir.path().join("missing.json"), &toml_path, |key| {
            env.get(key).map(|v| v.to_string())
        });
        assert_eq!(config.candidate_count, DEFAULT_CANDIDATE_COUNT);
        assert_eq!(config.max_output_tokens, 64);
    }
}
