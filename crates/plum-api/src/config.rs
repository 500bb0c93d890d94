use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use plum_core::store::NOTES_FILE_NAME;
use plum_core::sync::DEFAULT_MAX_PAYLOAD_BYTES;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;

const MIN_PAYLOAD_BYTES: usize = 1024;
const MAX_PAYLOAD_BYTES: usize = 1024 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub notes_path: PathBuf,
    pub author: String,
    pub max_payload_bytes: usize,
}

impl AppConfig {
    /// Config for serving `notes_path` on all interfaces at `port`
    pub fn for_port(port: u16, notes_path: PathBuf, author: impl Into<String>) -> Self {
        Self {
            bind_addr: format!("0.0.0.0:{port}"),
            notes_path,
            author: author.into(),
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let default_bind = format!("0.0.0.0:{DEFAULT_PORT}");
        let bind_addr = value_or_default(&lookup, "PLUM_BIND_ADDR", &default_bind);
        if !bind_addr.contains(':') {
            return Err(ConfigError::Invalid(
                "PLUM_BIND_ADDR must look like host:port".to_string(),
            ));
        }

        let notes_path = optional_trimmed(&lookup, "PLUM_NOTES_PATH")
            .map(PathBuf::from)
            .or_else(default_notes_path)
            .ok_or(ConfigError::MissingVar("PLUM_NOTES_PATH"))?;

        let author = optional_trimmed(&lookup, "PLUM_AUTHOR").unwrap_or_default();

        let default_payload = DEFAULT_MAX_PAYLOAD_BYTES.to_string();
        let max_payload_bytes =
            value_or_default(&lookup, "PLUM_MAX_PAYLOAD_BYTES", &default_payload)
                .parse::<usize>()
                .map_err(|_| {
                    ConfigError::Invalid(format!(
                        "PLUM_MAX_PAYLOAD_BYTES must be an integer in [{MIN_PAYLOAD_BYTES}, {MAX_PAYLOAD_BYTES}]"
                    ))
                })?;
        if !(MIN_PAYLOAD_BYTES..=MAX_PAYLOAD_BYTES).contains(&max_payload_bytes) {
            return Err(ConfigError::Invalid(format!(
                "PLUM_MAX_PAYLOAD_BYTES must be in [{MIN_PAYLOAD_BYTES}, {MAX_PAYLOAD_BYTES}]"
            )));
        }

        Ok(Self {
            bind_addr,
            notes_path,
            author,
            max_payload_bytes,
        })
    }
}

/// `<data dir>/plum/notes.json`, when the platform has a data dir
pub fn default_notes_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("plum").join(NOTES_FILE_NAME))
}

fn value_or_default(lookup: impl Fn(&str) -> Option<String>, name: &str, default: &str) -> String {
    optional_trimmed(lookup, name).unwrap_or_else(|| default.to_string())
}

fn optional_trimmed(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
