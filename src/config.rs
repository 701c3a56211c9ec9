//! Runtime configuration: environment first, then command-line overrides.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::db::{JsonStore, MemoryStore, SqliteStore, Store};
use crate::error::{SantaError, SantaResult};

pub const DEFAULT_DATA_DIR: &str = ".data";
pub const DEFAULT_LOG_FILTER: &str = "warn";
pub const SQLITE_FILE: &str = "santa.db";
pub const JSON_DIR: &str = "families";

/// Which `Store` implementation to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    Json,
    Memory,
}

impl FromStr for Backend {
    type Err = SantaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" | "db" => Ok(Self::Sqlite),
            "json" | "file" | "files" => Ok(Self::Json),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(SantaError::Other(format!(
                "Unknown store '{}' (expected sqlite, json or memory)",
                other
            ))),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sqlite => "sqlite",
            Self::Json => "json",
            Self::Memory => "memory",
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend: Backend,
    pub data_dir: PathBuf,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::Sqlite,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Reads `SANTA_STORE`, `SANTA_DATA_DIR` and `SANTA_LOG` (falling back to
    /// `RUST_LOG`). Unset variables keep their defaults.
    pub fn from_env() -> SantaResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> SantaResult<Self> {
        let mut config = Self::default();
        if let Some(store) = lookup("SANTA_STORE") {
            config.backend = store.parse()?;
        }
        if let Some(dir) = lookup("SANTA_DATA_DIR").filter(|d| !d.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(filter) = lookup("SANTA_LOG").or_else(|| lookup("RUST_LOG")) {
            config.log_filter = filter;
        }
        Ok(config)
    }

    pub fn sqlite_path(&self) -> PathBuf {
        self.data_dir.join(SQLITE_FILE)
    }

    pub fn json_dir(&self) -> PathBuf {
        self.data_dir.join(JSON_DIR)
    }

    /// Open the configured backend, creating directories and schema as needed.
    pub fn open_store(&self) -> SantaResult<Box<dyn Store>> {
        Ok(match self.backend {
            Backend::Sqlite => {
                std::fs::create_dir_all(&self.data_dir)?;
                Box::new(SqliteStore::open(&self.sqlite_path())?)
            }
            Backend::Json => Box::new(JsonStore::open(&self.json_dir())?),
            Backend::Memory => Box::new(MemoryStore::new()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.backend, Backend::Sqlite);
        assert_eq!(config.data_dir, PathBuf::from(".data"));
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.sqlite_path(), PathBuf::from(".data/santa.db"));
    }

    #[test]
    fn env_overrides_apply() {
        let config = Config::from_lookup(lookup(&[
            ("SANTA_STORE", "JSON"),
            ("SANTA_DATA_DIR", "/tmp/santa"),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.backend, Backend::Json);
        assert_eq!(config.json_dir(), PathBuf::from("/tmp/santa/families"));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn santa_log_wins_over_rust_log() {
        let config =
            Config::from_lookup(lookup(&[("SANTA_LOG", "santa=info"), ("RUST_LOG", "trace")]))
                .unwrap();
        assert_eq!(config.log_filter, "santa=info");
    }

    #[test]
    fn unknown_backend_is_an_error() {
        assert!(Config::from_lookup(lookup(&[("SANTA_STORE", "redis")])).is_err());
    }

    #[test]
    fn memory_backend_opens_without_touching_disk() {
        let config = Config {
            backend: Backend::Memory,
            data_dir: PathBuf::from("/nonexistent/santa"),
            ..Config::default()
        };
        let store = config.open_store().unwrap();
        assert!(store.list_families().unwrap().is_empty());
    }
}
