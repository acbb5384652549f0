//! Vault identity and lookup through the companion application's registry
//!
//! The companion app keeps a JSON registry of known vaults:
//!
//! ```json
//! { "vaults": { "8a1c...": { "path": "/home/me/Notes" } } }
//! ```
//!
//! A vault's name is the final component of its root path.

use crate::error::{NoteVaultError, Result};
use crate::io::config::ConfigStore;
use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the registry location
pub const VAULT_REGISTRY_ENV: &str = "NOTEVAULT_VAULT_REGISTRY";

/// A named vault rooted at a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vault {
    name: String,
    root: PathBuf,
}

impl Vault {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    /// Resolve the vault to operate on.
    ///
    /// A non-empty `name_override` wins; otherwise the configured default vault
    /// name is used. The name is then looked up in the registry.
    pub fn resolve(
        name_override: Option<&str>,
        config: &dyn ConfigStore,
        registry: &VaultRegistry,
    ) -> Result<Self> {
        let name = match name_override.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => name.to_string(),
            None => {
                let default_name = config.get()?.default_vault_name;
                if default_name.trim().is_empty() {
                    return Err(NoteVaultError::DefaultVaultNotSet);
                }
                default_name
            }
        };

        let root = registry.path_for(&name)?;
        debug!("Resolved vault {} to {}", name, root.display());
        Ok(Self::new(name, root))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    vaults: HashMap<String, RegistryEntry>,
}

#[derive(Debug, Deserialize)]
struct RegistryEntry {
    path: PathBuf,
}

/// Read-only view of the companion application's vault registry
#[derive(Debug, Clone)]
pub struct VaultRegistry {
    path: PathBuf,
}

impl VaultRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Registry at `$NOTEVAULT_VAULT_REGISTRY` or the platform default
    pub fn default_location() -> Self {
        if let Some(path) = std::env::var_os(VAULT_REGISTRY_ENV) {
            return Self::new(path);
        }
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join("obsidian").join("obsidian.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Find the root directory of the vault called `name`
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| NoteVaultError::config_read(&self.path, e.to_string()))?;
        let registry: RegistryFile = serde_json::from_str(&content)
            .map_err(|e| NoteVaultError::config_parse(&self.path, e.to_string()))?;

        registry
            .vaults
            .into_values()
            .map(|entry| entry.path)
            .find(|path| path.file_name().is_some_and(|base| base == name))
            .ok_or_else(|| NoteVaultError::vault_not_found(name))
    }
}
