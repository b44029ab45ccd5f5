//! Configuration for the sync tool.
//!
//! Layered settings:
//! - Default values
//! - TOML configuration file (`.cmakesync/settings.toml`)
//! - Environment variable overrides
//!
//! Environment variables are prefixed with `CMAKESYNC_` and use double
//! underscores to separate nested levels:
//! - `CMAKESYNC_WATCH__DEBOUNCE_MS=1000` sets `watch.debounce_ms`
//! - `CMAKESYNC_ENGINE__NESTED_PARENS=false` sets `engine.nested_parens`
//!
//! Settings are loaded once per top-level operation and threaded through
//! explicitly; nothing reads configuration ambiently.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::mapping::ExtensionMap;

/// Directory holding workspace-local state and settings.
pub const LOCAL_DIR: &str = ".cmakesync";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Workspace root directory (the ancestor walk boundary). Defaults to
    /// the current directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_root: Option<PathBuf>,

    /// Extension (with leading dot) to declaration group name.
    #[serde(default = "default_mapping")]
    pub mapping: ExtensionMap,

    /// Extensions tracked by the deletion watcher.
    #[serde(default = "default_managed_extensions")]
    pub managed_extensions: Vec<String>,

    /// Block-engine settings
    #[serde(default)]
    pub engine: EngineConfig,

    /// Deletion-watcher settings
    #[serde(default)]
    pub watch: WatchConfig,

    /// Reference-resolver settings
    #[serde(default)]
    pub refs: RefsConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EngineConfig {
    /// Track parenthesis depth when locating a block's closing paren.
    /// `false` restores the historical first-`)` behavior.
    #[serde(default = "default_true")]
    pub nested_parens: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WatchConfig {
    /// Trailing window for coalescing delete events into one batch.
    #[serde(default = "default_watch_debounce_ms")]
    pub debounce_ms: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RefsConfig {
    /// Minimum interval between reference re-scans of one document.
    #[serde(default = "default_refs_debounce_ms")]
    pub debounce_ms: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default level for all modules ("error", "warn", "info", "debug",
    /// "trace").
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-module overrides, e.g. `watcher = "debug"`.
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_version() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_watch_debounce_ms() -> u64 {
    500
}

fn default_refs_debounce_ms() -> u64 {
    300
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_mapping() -> ExtensionMap {
    let mut map = ExtensionMap::new();
    for ext in [".c", ".cc", ".cpp", ".cxx"] {
        map.insert(ext.to_string(), "SOURCES".to_string());
    }
    for ext in [".h", ".hh", ".hpp", ".hxx"] {
        map.insert(ext.to_string(), "HEADERS".to_string());
    }
    map
}

fn default_managed_extensions() -> Vec<String> {
    let mut extensions: Vec<String> = default_mapping().into_keys().collect();
    extensions.sort();
    extensions
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            nested_parens: default_true(),
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_watch_debounce_ms(),
        }
    }
}

impl Default for RefsConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_refs_debounce_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            workspace_root: None,
            mapping: default_mapping(),
            managed_extensions: default_managed_extensions(),
            engine: EngineConfig::default(),
            watch: WatchConfig::default(),
            refs: RefsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings: defaults, then the workspace TOML file, then
    /// `CMAKESYNC_*` environment overrides.
    pub fn load() -> Result<Self, Box<figment::Error>> {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from an explicit TOML path (used by the watcher's
    /// hot-reload, where the file lives under the watched root rather than
    /// the current directory).
    pub fn load_from(path: &std::path::Path) -> Result<Self, Box<figment::Error>> {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("CMAKESYNC_").split("__"))
            .extract()
            .map_err(Box::new)
    }

    /// Path of the workspace settings file, relative to the current
    /// directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from(LOCAL_DIR).join("settings.toml")
    }

    /// The ancestor-walk boundary: configured root or the current directory.
    pub fn resolved_workspace_root(&self) -> PathBuf {
        self.workspace_root
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Seed `.cmakesync/settings.toml` with the default configuration.
    pub fn init_config_file(force: bool) -> std::io::Result<PathBuf> {
        let path = Self::config_path();
        if path.exists() && !force {
            return Err(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(&Settings::default())
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        fs::write(&path, toml_str)?;
        Ok(path)
    }
}
