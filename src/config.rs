//! Configuration management.
//!
//! Loads from `~/.config/mobilecli/config.toml` (or an explicit path),
//! falling back to defaults for anything missing or when no file exists.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::agent::{PORT_FORWARD_RANGE_END, PORT_FORWARD_RANGE_START, SIMULATOR_DEVICEKIT_PORT};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub agent: AgentConfig,

    #[serde(default)]
    pub android: AndroidConfig,

    #[serde(default)]
    pub ios: IosConfig,
}

/// HTTP/WebSocket server defaults, overridable per-invocation by CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Whether to attach a permissive CORS layer; off by default since the
    /// server is meant to be reached from localhost tooling.
    #[serde(default)]
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: false,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8090
}

/// On-device agent bootstrap defaults shared by both iOS substrates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_port_range_start")]
    pub port_range_start: u16,
    #[serde(default = "default_port_range_end")]
    pub port_range_end: u16,
    #[serde(default = "default_simulator_devicekit_port")]
    pub simulator_devicekit_port: u16,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            port_range_start: default_port_range_start(),
            port_range_end: default_port_range_end(),
            simulator_devicekit_port: default_simulator_devicekit_port(),
        }
    }
}

fn default_port_range_start() -> u16 {
    PORT_FORWARD_RANGE_START
}

fn default_port_range_end() -> u16 {
    PORT_FORWARD_RANGE_END
}

fn default_simulator_devicekit_port() -> u16 {
    SIMULATOR_DEVICEKIT_PORT
}

/// Defaults used when creating new Android Virtual Devices.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AndroidConfig {
    pub default_ram: String,
    pub default_storage: String,
    pub default_api_level: u32,
}

/// Defaults used when creating new iOS simulators.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IosConfig {
    pub default_device_type: String,
    pub default_ios_version: String,
}

impl Config {
    /// Loads configuration from `path`, or from the platform config directory
    /// if `path` is `None`, or falls back to defaults if neither exists.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let resolved = path.or_else(Self::default_path);
        match resolved {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mobilecli").join("config.toml"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            agent: AgentConfig::default(),
            android: AndroidConfig::default(),
            ios: IosConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_ports() {
        let config = Config::default();
        assert_eq!(config.server.port, 8090);
        assert!(!config.server.cors);
        assert_eq!(config.agent.port_range_start, PORT_FORWARD_RANGE_START);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load(Some(PathBuf::from("/nonexistent/mobilecli.toml"))).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn parses_partial_toml_with_defaults_for_the_rest() {
        let dir = std::env::temp_dir().join("mobilecli-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("partial.toml");
        std::fs::write(&path, "[server]\nport = 9000\n").unwrap();

        let config = Config::load(Some(path)).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
    }
}
