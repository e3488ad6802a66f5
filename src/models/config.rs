use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::FriendifyError;
use crate::models::gateway::DEFAULT_LATENCY;
use crate::models::store::DEFAULT_PAGE_SIZE;

const STUB_AUTH_TOKEN: &str = "mock-session-token";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeMode,
    pub auth_token: Option<String>,
    pub page_size: usize,
    pub latency_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            auth_token: Some(STUB_AUTH_TOKEN.to_string()),
            page_size: DEFAULT_PAGE_SIZE,
            latency_ms: DEFAULT_LATENCY.as_millis() as u64,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf, FriendifyError> {
        Ok(dirs::home_dir()
            .ok_or_else(|| FriendifyError::Config("Could not find home directory".to_string()))?
            .join(".config/friendify/config.json"))
    }

    pub fn load() -> Result<Self, FriendifyError> {
        Self::load_from(&Self::default_path()?)
    }

    pub fn save(&self) -> Result<(), FriendifyError> {
        self.save_to(&Self::default_path()?)
    }

    /// Read the config at `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, FriendifyError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(FriendifyError::Config(format!(
                    "Failed to open config file at {:?}: {}",
                    path, e
                )))
            }
        };

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context("Failed to parse config JSON")?;

        if config.page_size == 0 {
            return Err(FriendifyError::Config("page_size must be at least 1".to_string()));
        }
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), FriendifyError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(&self)
            .context("Failed to serialize config to JSON")?;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("Failed to open conf file for writing at {:?}", path))?;

        file.write_all(json.as_bytes())
            .context("Failed to write config data")?;

        Ok(())
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.page_size, 10);
        assert_eq!(config.latency(), DEFAULT_LATENCY);
    }

    #[test]
    fn theme_and_token_survive_a_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.json");

        let mut config = Config::default();
        config.toggle_theme();
        config.auth_token = Some("abc".into());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.theme, ThemeMode::Light);
        assert_eq!(loaded.auth_token.as_deref(), Some("abc"));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "theme": "light" }"#).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.theme, ThemeMode::Light);
        assert_eq!(loaded.latency_ms, 500);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
