//! Configuration for mdview, loaded once at startup from `config.toml`.
//!
//! The config file lives in the project config directory by default
//! (`~/.config/mdview/config.toml` on Linux) and can be overridden with
//! `--config-file`. A missing file yields the defaults; a malformed file
//! yields the defaults plus the parse error so the caller can warn once.

use dirs::Dirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::OnceLock;

static CONFIG: OnceLock<Config> = OnceLock::new();

struct LoadedConfig {
    config: Config,
    maybe_error: Option<toml::de::Error>,
}

fn load_config(specified_config_file: Option<PathBuf>) -> LoadedConfig {
    let config_file = specified_config_file.unwrap_or_else(Dirs::default_config_file);

    let mut maybe_config_err = None;
    let config = std::fs::read_to_string(config_file)
        .ok()
        .and_then(|contents| {
            toml::from_str(&contents)
                .map_err(|err| {
                    maybe_config_err.replace(err);
                })
                .ok()
        })
        .unwrap_or_default();

    LoadedConfig {
        config,
        maybe_error: maybe_config_err,
    }
}

/// Loads the config file and initializes the global [`Config`].
///
/// Must be called once before [`config()`]; repeated calls keep the first
/// loaded value.
pub fn load_config_on_startup(
    specified_config_file: Option<PathBuf>,
) -> (&'static Config, Option<toml::de::Error>) {
    let LoadedConfig {
        config: loaded_config,
        maybe_error,
    } = load_config(specified_config_file);

    (CONFIG.get_or_init(|| loaded_config), maybe_error)
}

pub fn config() -> &'static Config {
    CONFIG.get().expect("Config uninitialized")
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct LogConfig {
    /// Specify the log file path.
    ///
    /// This path must be an absolute path.
    pub log_file: Option<String>,

    /// Specify the max log level.
    pub max_level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            max_level: "debug".into(),
        }
    }
}

/// Server discovery protocol.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// Override the port advertisement file location.
    pub port_file: Option<PathBuf>,

    /// How long a reachability probe waits for a response, in milliseconds.
    pub probe_timeout_ms: u64,

    /// Delay between two discovery polling attempts, in milliseconds.
    pub poll_interval_ms: u64,

    /// Number of polling attempts before discovery gives up on a freshly
    /// started server.
    pub max_attempts: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            port_file: None,
            probe_timeout_ms: 1000,
            poll_interval_ms: 500,
            max_attempts: 20,
        }
    }
}

impl DiscoveryConfig {
    /// Resolved advertisement file path, falling back to the well-known
    /// location under the project cache directory.
    pub fn port_file_path(&self) -> PathBuf {
        self.port_file.clone().unwrap_or_else(Dirs::default_port_file)
    }
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Log configuration.
    pub log: LogConfig,

    /// Discovery protocol configuration.
    pub discovery: DiscoveryConfig,
}
