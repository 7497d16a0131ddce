use std::{collections::HashMap, fs, path::Path, time::Duration};

use anyhow::Context;
use client_core::DEFAULT_CREATE_STUDENT_PATH;
use url::Url;

pub const SETTINGS_FILE: &str = "registrar.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub create_student_path: String,
    pub request_timeout_secs: Option<u64>,
    pub command_queue_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:3000".into(),
            create_student_path: DEFAULT_CREATE_STUDENT_PATH.into(),
            request_timeout_secs: None,
            command_queue_capacity: 16,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then `path` (flat key/value TOML, optional), then environment.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        let file_cfg: HashMap<String, toml::Value> = toml::from_str(&raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
        if let Some(v) = file_cfg.get("server_url").and_then(toml::Value::as_str) {
            settings.server_url = v.to_string();
        }
        if let Some(v) = file_cfg
            .get("create_student_path")
            .and_then(toml::Value::as_str)
        {
            settings.create_student_path = v.to_string();
        }
        if let Some(v) = file_cfg
            .get("request_timeout_secs")
            .and_then(toml::Value::as_integer)
        {
            settings.request_timeout_secs = u64::try_from(v).ok();
        }
        if let Some(v) = file_cfg
            .get("command_queue_capacity")
            .and_then(toml::Value::as_integer)
        {
            if let Ok(capacity) = usize::try_from(v) {
                settings.command_queue_capacity = capacity;
            }
        }
    }

    if let Some(v) = env("REGISTRAR_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = env("APP__CREATE_STUDENT_PATH") {
        settings.create_student_path = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = Some(parsed);
        }
    }

    if let Some(v) = env("APP__COMMAND_QUEUE_CAPACITY") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.command_queue_capacity = parsed;
        }
    }

    settings.server_url = normalize_server_url(&settings.server_url)?;
    settings.command_queue_capacity = settings.command_queue_capacity.max(1);
    Ok(settings)
}

pub fn normalize_server_url(raw_server_url: &str) -> anyhow::Result<String> {
    let raw_server_url = raw_server_url.trim();

    if raw_server_url.is_empty() {
        return Ok(Settings::default().server_url);
    }

    let server_url = if raw_server_url.contains("://") {
        raw_server_url.to_string()
    } else {
        format!("http://{raw_server_url}")
    };

    let parsed = Url::parse(&server_url)
        .with_context(|| format!("invalid server url '{raw_server_url}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!(
            "unsupported scheme '{}' in server url '{raw_server_url}'",
            parsed.scheme()
        );
    }

    Ok(server_url.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
