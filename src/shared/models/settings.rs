//! Layered server/client settings.
//!
//! Sources, lowest to highest priority: built-in defaults, `settings.json` in
//! the working directory, `KANBAN_*` environment variables (`__` separates
//! sections, e.g. `KANBAN_SERVER__PORT=8080`).

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Json, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SETTINGS_FILENAME: &str = "settings.json";
const ENV_PREFIX: &str = "KANBAN_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Figment(#[from] figment::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub client: ClientSettings,
    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Redb,
    Json,
    Memory,
}

/// Where the task collection lives.
///
/// One server process per store: read-modify-write cycles are serialized
/// inside a process only, so two servers sharing a store lose writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    pub kind: StoreKind,
    pub path: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            kind: StoreKind::Redb,
            path: PathBuf::from("data/tasks.redb"),
        }
    }
}

/// Which backend the board view model talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientMode {
    /// Through the HTTP API of a running server.
    Remote,
    /// Against a repository opened in-process on `store`.
    Local,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    pub mode: ClientMode,
    pub base_url: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            mode: ClientMode::Remote,
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Settings, ConfigError> {
        Self::load_from(SETTINGS_FILENAME)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Settings, ConfigError> {
        Self::figment(path).extract().map_err(ConfigError::from)
    }

    pub fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Json::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.bind, self.server.port)
    }
}
