//! Directory listing and glob matching inside a vault
//!
//! Both entry points return display strings relative to the vault root, with a
//! trailing `/` marking directories. Hidden entries (leading `.`) never appear.

use crate::core::path::{is_hidden_relative, relative_display, validate_path};
use crate::error::{NoteVaultError, Result};
use globset::GlobBuilder;
use log::debug;
use std::fs;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Configuration for the entry lister
#[derive(Debug, Clone, Default)]
pub struct ListerConfig {
    /// Treat symbolic links to directories as directories
    pub follow_links: bool,
}

/// Lists vault directories and resolves glob patterns
pub struct EntryLister {
    config: ListerConfig,
}

impl EntryLister {
    /// Create a new lister with default configuration
    pub fn new() -> Self {
        Self {
            config: ListerConfig::default(),
        }
    }

    /// Create a new lister with custom configuration
    pub fn with_config(config: ListerConfig) -> Self {
        Self { config }
    }

    /// List the immediate children of `relative` (the root when empty).
    ///
    /// Directories come first, then files; each group sorted by name.
    pub fn list(&self, root: &Path, relative: &str) -> Result<Vec<String>> {
        let target = validate_path(root, relative)?;

        let is_dir = fs::metadata(&target).map(|m| m.is_dir()).unwrap_or(false);
        if !is_dir {
            return Err(NoteVaultError::not_a_directory(&target));
        }

        let entries = fs::read_dir(&target).map_err(|e| {
            NoteVaultError::vault_read(format!("{}: {}", target.display(), e))
        })?;

        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| NoteVaultError::vault_read(e.to_string()))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let file_type = entry
                .file_type()
                .map_err(|e| NoteVaultError::vault_read(e.to_string()))?;
            let is_dir = file_type.is_dir()
                || (self.config.follow_links && file_type.is_symlink() && entry.path().is_dir());

            if is_dir {
                dirs.push(format!("{name}/"));
            } else {
                files.push(name);
            }
        }

        dirs.sort();
        files.sort();
        dirs.extend(files);
        Ok(dirs)
    }

    /// Match `pattern` against every entry under `root`.
    ///
    /// Supports `*`, `?`, `[...]` within one segment and `**` across segments.
    /// Any pattern containing `..` is refused before touching the disk.
    pub fn glob(&self, root: &Path, pattern: &str) -> Result<Vec<String>> {
        if pattern.contains("..") {
            return Err(NoteVaultError::path_traversal(pattern));
        }

        let segments: Vec<&str> = pattern
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();
        let pattern = segments.join("/");
        let matcher = GlobBuilder::new(&pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| NoteVaultError::invalid_glob(&pattern, e.to_string()))?
            .compile_matcher();

        if !root.is_dir() {
            return Err(NoteVaultError::vault_read(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        let max_depth = if pattern.contains("**") {
            usize::MAX
        } else {
            segments.len()
        };

        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(self.config.follow_links)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden_entry(e));

        let mut results = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry during glob: {}", e);
                    continue;
                }
            };

            let Some(relative) = relative_display(root, entry.path()) else {
                continue;
            };
            if !matcher.is_match(&relative) || is_hidden_relative(&relative) {
                continue;
            }

            if entry.path().is_dir() {
                results.push(format!("{relative}/"));
            } else {
                results.push(relative);
            }
        }

        results.sort();
        Ok(results)
    }
}

impl Default for EntryLister {
    fn default() -> Self {
        Self::new()
    }
}

fn is_hidden_entry(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
