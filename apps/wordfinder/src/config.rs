use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use lookup_client::{normalize_base_url, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
use shared::protocol::DEFAULT_MAX_RESULTS;

pub const DEFAULT_CONFIG_FILE: &str = "wordfinder.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub max_results: u32,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.into(),
            max_results: DEFAULT_MAX_RESULTS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Overrides given on the command line; they win over file and environment.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub api_base_url: Option<String>,
    pub max_results: Option<u32>,
}

pub fn load_settings(overrides: &CliOverrides) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match &overrides.config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?;
            apply_file(&mut settings, &raw)
                .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
        }
        None => {
            if let Ok(raw) = fs::read_to_string(Path::new(DEFAULT_CONFIG_FILE)) {
                if let Err(err) = apply_file(&mut settings, &raw) {
                    tracing::warn!("ignoring malformed {DEFAULT_CONFIG_FILE}: {err:#}");
                }
            }
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());

    if let Some(url) = &overrides.api_base_url {
        settings.api_base_url = url.clone();
    }
    if let Some(max) = overrides.max_results {
        settings.max_results = max;
    }

    settings.api_base_url = normalize_base_url(&settings.api_base_url)?;
    Ok(settings)
}

/// Applies a toml config file. Nothing is applied unless the whole file is valid.
fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: HashMap<String, toml::Value> = toml::from_str(raw)?;

    let api_base_url = file_cfg.get("api_base_url").and_then(toml::Value::as_str);
    let max_results = file_cfg
        .get("max_results")
        .and_then(as_u64)
        .map(u32::try_from)
        .transpose()
        .context("max_results out of range")?;
    let request_timeout_secs = file_cfg.get("request_timeout_secs").and_then(as_u64);

    if let Some(v) = api_base_url {
        settings.api_base_url = v.to_string();
    }
    if let Some(v) = max_results {
        settings.max_results = v;
    }
    if let Some(v) = request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    Ok(())
}

fn as_u64(value: &toml::Value) -> Option<u64> {
    match value {
        toml::Value::Integer(n) => u64::try_from(*n).ok(),
        toml::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("WORDFINDER_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    for key in ["WORDFINDER_MAX_RESULTS", "APP__MAX_RESULTS"] {
        if let Some(parsed) = var(key).and_then(|v| v.trim().parse::<u32>().ok()) {
            settings.max_results = parsed;
        }
    }

    if let Some(parsed) = var("APP__REQUEST_TIMEOUT_SECS").and_then(|v| v.trim().parse::<u64>().ok())
    {
        settings.request_timeout_secs = parsed;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
