//! Shared fixtures and collaborator doubles for integration tests

#![allow(dead_code)]

use notevault::error::{NoteVaultError, Result};
use notevault::io::{CliConfig, ConfigStore, ConfigUpdate, EditorLauncher, FuzzyFinder, UriLauncher};
use notevault::Vault;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A vault on disk with a few notes, directories and hidden entries
pub fn sample_vault() -> (TempDir, Vault) {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    fs::create_dir_all(root.join("projects/archive")).unwrap();
    fs::create_dir_all(root.join("daily")).unwrap();
    fs::create_dir_all(root.join(".obsidian")).unwrap();

    fs::write(
        root.join("alpha.md"),
        "---\nstatus: active\ntags:\n- rust\n- cli\npriority: 2\n---\n# Alpha\n\nSee [[beta]].\n",
    )
    .unwrap();
    fs::write(
        root.join("beta.md"),
        "---\nstatus: draft\npublished: false\n---\n# Beta\n\nA test note. Another test.\n",
    )
    .unwrap();
    fs::write(root.join("plain.md"), "No front matter here.\n").unwrap();
    fs::write(root.join("broken.md"), "---\nstatus: [unclosed\n---\nbody\n").unwrap();
    fs::write(root.join("readme.txt"), "status: active").unwrap();
    fs::write(
        root.join("projects/gamma.md"),
        "---\nstatus: active\ntags: [go]\n---\nGamma links [[beta|B]].\n",
    )
    .unwrap();
    fs::write(root.join("projects/archive/old.md"), "---\nstatus: archived\n---\n").unwrap();
    fs::write(root.join(".obsidian/workspace.md"), "---\nstatus: active\n---\n").unwrap();

    let vault = Vault::new("Sample", root);
    (dir, vault)
}

/// Records every URI instead of handing it to the OS
#[derive(Default)]
pub struct RecordingUriLauncher {
    pub executed: RefCell<Vec<String>>,
}

impl RecordingUriLauncher {
    pub fn uris(&self) -> Vec<String> {
        self.executed.borrow().clone()
    }
}

impl UriLauncher for RecordingUriLauncher {
    fn execute(&self, uri: &str) -> Result<()> {
        self.executed.borrow_mut().push(uri.to_string());
        Ok(())
    }
}

/// Records the files it was asked to open
#[derive(Default)]
pub struct RecordingEditor {
    pub opened: RefCell<Vec<PathBuf>>,
}

impl EditorLauncher for RecordingEditor {
    fn open_in_editor(&self, path: &Path) -> Result<()> {
        self.opened.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

/// Picks the item whose label equals `choice`, or fails the way `fzf` would
pub enum ScriptedFinder {
    Choose(String),
    Cancel,
}

impl ScriptedFinder {
    pub fn choose(label: &str) -> Self {
        Self::Choose(label.to_string())
    }
}

impl FuzzyFinder for ScriptedFinder {
    fn find<T>(&self, items: &[T], label: impl Fn(&T) -> String) -> Result<usize> {
        match self {
            Self::Choose(choice) => items
                .iter()
                .position(|item| &label(item) == choice)
                .ok_or(NoteVaultError::NoSelection),
            Self::Cancel => Err(NoteVaultError::Cancelled),
        }
    }
}

/// Preferences held in memory
#[derive(Default)]
pub struct MemoryConfigStore {
    pub config: RefCell<CliConfig>,
}

impl MemoryConfigStore {
    pub fn with_daily_pattern(pattern: &str) -> Self {
        let store = Self::default();
        store.config.borrow_mut().daily_note_pattern = Some(pattern.to_string());
        store
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self) -> Result<CliConfig> {
        Ok(self.config.borrow().clone())
    }

    fn set(&self, update: ConfigUpdate) -> Result<()> {
        update.apply_to(&mut self.config.borrow_mut());
        Ok(())
    }
}
