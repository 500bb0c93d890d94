//! Installation settings consumed by the core

use serde::{Deserialize, Serialize};

/// User settings: the author tag stamped on new notes and the default sync peer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Free-text identity, empty when unconfigured
    #[serde(default)]
    pub author: String,
    /// Default sync peer as `host:port`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syncserver: Option<String>,
}

impl Settings {
    /// Keys accepted by `set`
    pub const KEYS: [&'static str; 2] = ["author", "syncserver"];

    /// Set a key by name; returns `false` for unknown keys
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        match key {
            "author" => {
                self.author = value.trim().to_string();
                true
            }
            "syncserver" => {
                let value = value.trim();
                self.syncserver = (!value.is_empty()).then(|| value.to_string());
                true
            }
            _ => false,
        }
    }

    /// The configured sync peer, ignoring blank values
    pub fn sync_server(&self) -> Option<&str> {
        self.syncserver
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}
