use anyhow::Context;
use cookbook_core::{FilterPolicy, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: Server,
    #[serde(default)]
    pub list: List,
    pub log: Option<Log>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    /// Backend root, e.g. http://localhost:8081
    pub base_url: String,
    /// Per-request timeout in milliseconds; unset waits as long as the OS does
    pub timeout_ms: Option<u64>,
}

impl Default for Server {
    fn default() -> Self {
        Server {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct List {
    /// Keep an active search after add/update/delete instead of clearing it
    #[serde(default)]
    pub keep_filter_after_mutation: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Log {
    /// tracing filter directive, e.g. "cookbook_core=debug"
    pub filter: Option<String>,
}

impl Settings {
    pub fn filter_policy(&self) -> FilterPolicy {
        if self.list.keep_filter_after_mutation {
            FilterPolicy::Keep
        } else {
            FilterPolicy::ResetOnMutation
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.server.timeout_ms.map(Duration::from_millis)
    }
}

pub fn config_dir() -> PathBuf {
    if let Some(bd) = directories::BaseDirs::new() {
        bd.config_dir().join("cookbook")
    } else {
        PathBuf::from("./.config/cookbook")
    }
}

pub fn state_dir() -> PathBuf {
    // Prefer XDG state dir when available; fall back to config dir
    if let Some(bd) = directories::BaseDirs::new() {
        if let Some(sd) = bd.state_dir() {
            return sd.join("cookbook");
        }
    }
    config_dir()
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.toml")
}

pub fn session_path() -> PathBuf {
    state_dir().join("session.json")
}

/// Reads settings.toml. A missing file means defaults.
pub fn load_settings() -> anyhow::Result<Settings> {
    let path = settings_path();
    match std::fs::read_to_string(&path) {
        Ok(s) => toml::from_str(&s).with_context(|| format!("parsing {}", path.display())),
        Err(_) => Ok(Settings::default()),
    }
}
