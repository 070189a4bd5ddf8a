use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

use crate::{AllyError, Result};

/// Built-in connection defaults, used when neither a flag nor the config
/// file provides a value.
pub const DEFAULT_USERNAME: &str = "centos";
pub const DEFAULT_PORT: u16 = 22;
pub const DEFAULT_KEY_PATH: &str = "~/.ssh";
pub const DEFAULT_REMOTE_DIR: &str = "~";

/// Keys accepted by `ally config set`/`unset`.
pub const SETTING_KEYS: &[&str] = &["username", "port", "key-path", "directory", "region"];

/// Persisted defaults for ally. Every field is optional; an absent field
/// falls back to the built-in default at resolution time.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Login username for remote sessions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// SSH port
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Directory holding the .pem key files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_path: Option<String>,

    /// Remote directory copied files land in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,

    /// AWS region override (None = use AWS default from environment/config)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Settings {
    /// Get the path to the config file
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "ally").map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load settings from the config file
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| AllyError::Config("Cannot determine config directory".to_string()))?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let settings: Settings = serde_json::from_str(&content)
            .map_err(|e| AllyError::Config(format!("Failed to parse config file: {}", e)))?;

        Ok(settings)
    }

    /// Save settings to the config file with restricted permissions (0600)
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| AllyError::Config("Cannot determine config directory".to_string()))?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;

        // Write with restricted permissions (owner read/write only)
        #[cfg(unix)]
        {
            let mut file = std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&path)?;
            file.write_all(content.as_bytes())?;
        }

        #[cfg(not(unix))]
        {
            std::fs::write(&path, content)?;
        }

        Ok(())
    }

    /// Set a default by key, validating the value
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "username" => self.username = Some(value.to_string()),
            "port" => {
                let port: u16 = value
                    .parse()
                    .map_err(|_| AllyError::Config(format!("Invalid port: {}", value)))?;
                self.port = Some(port);
            }
            "key-path" => self.key_path = Some(value.to_string()),
            "directory" => self.directory = Some(value.to_string()),
            "region" => self.region = Some(value.to_string()),
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }

    /// Clear a default by key
    pub fn unset(&mut self, key: &str) -> Result<()> {
        match key {
            "username" => self.username = None,
            "port" => self.port = None,
            "key-path" => self.key_path = None,
            "directory" => self.directory = None,
            "region" => self.region = None,
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }

    /// Effective username: flag > config file > built-in default
    pub fn resolve_username(&self, flag: Option<String>) -> String {
        flag.or_else(|| self.username.clone())
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string())
    }

    /// Effective SSH port
    pub fn resolve_port(&self, flag: Option<u16>) -> u16 {
        flag.or(self.port).unwrap_or(DEFAULT_PORT)
    }

    /// Effective key directory, tilde-expanded
    pub fn resolve_key_dir(&self, flag: Option<String>) -> PathBuf {
        let raw = flag
            .or_else(|| self.key_path.clone())
            .unwrap_or_else(|| DEFAULT_KEY_PATH.to_string());
        expand_tilde(&raw)
    }

    /// Effective remote directory for copies; never tilde-expanded since it
    /// names a path on the remote host.
    pub fn resolve_remote_dir(&self, flag: Option<String>) -> String {
        flag.or_else(|| self.directory.clone())
            .unwrap_or_else(|| DEFAULT_REMOTE_DIR.to_string())
    }

    /// Effective AWS region, if any
    pub fn resolve_region(&self, flag: Option<String>) -> Option<String> {
        flag.or_else(|| self.region.clone())
    }
}

fn unknown_key(key: &str) -> AllyError {
    AllyError::Config(format!(
        "Unknown setting '{}' (expected one of: {})",
        key,
        SETTING_KEYS.join(", ")
    ))
}

/// Expand a leading `~/` (or bare `~`) to the user's home directory.
/// Anything else passes through untouched.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Get the user's home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
