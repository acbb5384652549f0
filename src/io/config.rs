//! Persisted CLI preferences
//!
//! A small JSON file holding the default vault name and the daily-note pattern.
//! Loaded before use, saved after every change; nothing is cached in memory.

use crate::error::{NoteVaultError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the preferences directory
pub const CONFIG_DIR_ENV: &str = "NOTEVAULT_CONFIG_DIR";

const CONFIG_FILE_NAME: &str = "preferences.json";

/// Stored preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub default_vault_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_note_pattern: Option<String>,
}

/// Partial update; `None` fields keep their stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigUpdate {
    pub default_vault_name: Option<String>,
    pub daily_note_pattern: Option<String>,
}

impl ConfigUpdate {
    pub fn default_vault_name(name: impl Into<String>) -> Self {
        Self {
            default_vault_name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn daily_note_pattern(pattern: impl Into<String>) -> Self {
        Self {
            daily_note_pattern: Some(pattern.into()),
            ..Default::default()
        }
    }

    /// Apply this update on top of `config`
    pub fn apply_to(self, config: &mut CliConfig) {
        if let Some(name) = self.default_vault_name {
            config.default_vault_name = name;
        }
        if let Some(pattern) = self.daily_note_pattern {
            config.daily_note_pattern = Some(pattern).filter(|p| !p.is_empty());
        }
    }
}

/// Access to the persisted preferences
pub trait ConfigStore {
    fn get(&self) -> Result<CliConfig>;
    fn set(&self, update: ConfigUpdate) -> Result<()>;

    /// The configured daily-note pattern, failing when none is set
    fn daily_note_pattern(&self) -> Result<String> {
        let config = match self.get() {
            Ok(config) => config,
            Err(NoteVaultError::ConfigRead { .. }) => {
                return Err(NoteVaultError::DailyPatternNotConfigured)
            }
            Err(e) => return Err(e),
        };
        config
            .daily_note_pattern
            .filter(|p| !p.trim().is_empty())
            .ok_or(NoteVaultError::DailyPatternNotConfigured)
    }
}

/// JSON-file backed preferences
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    /// Store backed by an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under `$NOTEVAULT_CONFIG_DIR` or the platform config directory
    pub fn default_location() -> Self {
        let dir = std::env::var_os(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::config_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("notevault")
            });
        Self::new(dir.join(CONFIG_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for JsonConfigStore {
    fn get(&self) -> Result<CliConfig> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| NoteVaultError::config_read(&self.path, e.to_string()))?;
        serde_json::from_str(&content)
            .map_err(|e| NoteVaultError::config_parse(&self.path, e.to_string()))
    }

    fn set(&self, update: ConfigUpdate) -> Result<()> {
        let mut config = match self.get() {
            Ok(config) => config,
            Err(e) => {
                debug!("Starting from default preferences: {}", e);
                CliConfig::default()
            }
        };
        update.apply_to(&mut config);

        let json = serde_json::to_string_pretty(&config)
            .map_err(|e| NoteVaultError::config_write(&self.path, e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| NoteVaultError::config_write(parent, e.to_string()))?;
        }
        fs::write(&self.path, json)
            .map_err(|e| NoteVaultError::config_write(&self.path, e.to_string()))?;

        debug!("Saved preferences to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_then_get() {
        let dir = TempDir::new().unwrap();
        let store = JsonConfigStore::new(dir.path().join("nested/preferences.json"));

        store.set(ConfigUpdate::default_vault_name("Work")).unwrap();
        store.set(ConfigUpdate::daily_note_pattern("daily/YYYY-MM-DD")).unwrap();

        let config = store.get().unwrap();
        assert_eq!(config.default_vault_name, "Work");
        assert_eq!(config.daily_note_pattern.as_deref(), Some("daily/YYYY-MM-DD"));
    }

    #[test]
    fn test_update_preserves_other_fields() {
        let dir = TempDir::new().unwrap();
        let store = JsonConfigStore::new(dir.path().join("preferences.json"));
        store.set(ConfigUpdate::daily_note_pattern("YYYY")).unwrap();
        store.set(ConfigUpdate::default_vault_name("Home")).unwrap();

        assert_eq!(store.daily_note_pattern().unwrap(), "YYYY");
    }

    #[test]
    fn test_get_missing_and_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        let store = JsonConfigStore::new(&path);
        assert!(matches!(store.get().unwrap_err(), NoteVaultError::ConfigRead { .. }));

        fs::write(&path, "{oops").unwrap();
        assert!(matches!(store.get().unwrap_err(), NoteVaultError::ConfigParse { .. }));
    }

    #[test]
    fn test_daily_pattern_not_configured() {
        let dir = TempDir::new().unwrap();
        let store = JsonConfigStore::new(dir.path().join("preferences.json"));
        assert!(matches!(
            store.daily_note_pattern().unwrap_err(),
            NoteVaultError::DailyPatternNotConfigured
        ));

        store.set(ConfigUpdate::default_vault_name("Work")).unwrap();
        assert!(matches!(
            store.daily_note_pattern().unwrap_err(),
            NoteVaultError::DailyPatternNotConfigured
        ));
    }

    #[test]
    fn test_reads_legacy_file_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, r#"{"default_vault_name":"Notes"}"#).unwrap();
        let config = JsonConfigStore::new(&path).get().unwrap();
        assert_eq!(config.default_vault_name, "Notes");
        assert_eq!(config.daily_note_pattern, None);
    }

    #[test]
    fn test_write_failure() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();
        let store = JsonConfigStore::new(blocker.join("preferences.json"));
        assert!(matches!(
            store.set(ConfigUpdate::default_vault_name("x")).unwrap_err(),
            NoteVaultError::ConfigWrite { .. }
        ));
    }
}
