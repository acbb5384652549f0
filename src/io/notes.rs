//! Reading, writing and scanning notes on disk
//!
//! All note names are vault-relative. A bare name gets the `.md` suffix and is
//! validated against the vault root before any file is opened.

use crate::core::path::{add_md_suffix, is_hidden_relative, is_markdown, relative_display, validate_path};
use crate::error::{NoteVaultError, Result};
use crate::io::vault::Vault;
use log::{debug, info};
use regex::{Regex, RegexBuilder};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Configuration for the note store
#[derive(Debug, Clone)]
pub struct NoteStoreConfig {
    /// Write to a temp file first, then rename over the note
    pub atomic_writes: bool,
    /// Keep an existing note's permissions; new notes get `0644` on unix
    pub preserve_permissions: bool,
    /// Longest snippet shown for a content match, in characters
    pub snippet_width: usize,
}

impl Default for NoteStoreConfig {
    fn default() -> Self {
        Self {
            atomic_writes: true,
            preserve_permissions: true,
            snippet_width: 80,
        }
    }
}

/// A search hit inside a vault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteMatch {
    /// Vault-relative path of the note
    pub path: String,
    /// 1-based line number, or 0 when the file name itself matched
    pub line: usize,
    /// Matched line (trimmed and shortened) or the path for file-name hits
    pub snippet: String,
}

impl NoteMatch {
    /// `path` or `path:line` for content hits
    pub fn location(&self) -> String {
        if self.line > 0 {
            format!("{}:{}", self.path, self.line)
        } else {
            self.path.clone()
        }
    }
}

/// Disk access for notes in a vault
pub struct NoteStore {
    config: NoteStoreConfig,
}

impl NoteStore {
    /// Create a new store with default configuration
    pub fn new() -> Self {
        Self {
            config: NoteStoreConfig::default(),
        }
    }

    /// Create a new store with custom configuration
    pub fn with_config(config: NoteStoreConfig) -> Self {
        Self { config }
    }

    /// Absolute path of a note, `.md` added when missing
    pub fn note_path(&self, vault: &Vault, note_name: &str) -> Result<PathBuf> {
        validate_path(vault.root(), &add_md_suffix(note_name))
    }

    pub fn exists(&self, vault: &Vault, note_name: &str) -> Result<bool> {
        Ok(self.note_path(vault, note_name)?.is_file())
    }

    /// Read a note's raw content
    pub fn read(&self, vault: &Vault, note_name: &str) -> Result<String> {
        let path = self.note_path(vault, note_name)?;
        if !path.is_file() {
            return Err(NoteVaultError::note_not_found(add_md_suffix(note_name)));
        }
        Ok(fs::read_to_string(&path)?)
    }

    /// Replace a note's content, creating it and its parent directories as needed.
    ///
    /// A symlinked note is written through to its target, which must also live
    /// inside the vault.
    pub fn write(&self, vault: &Vault, note_name: &str, content: &str) -> Result<PathBuf> {
        let path = self.note_path(vault, note_name)?;
        let target = resolve_write_target(vault, &path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        if self.config.atomic_writes {
            let permissions = self.target_permissions(&target);
            write_atomic(&target, content, permissions)?;
        } else {
            fs::write(&target, content)?;
        }

        info!("Wrote {} bytes to {}", content.len(), target.display());
        Ok(path)
    }

    fn target_permissions(&self, target: &Path) -> Option<fs::Permissions> {
        if !self.config.preserve_permissions {
            return None;
        }
        match fs::metadata(target) {
            Ok(metadata) => Some(metadata.permissions()),
            Err(_) => new_note_permissions(),
        }
    }

    /// Every markdown note under the vault root, sorted
    pub fn list_notes(&self, vault: &Vault) -> Result<Vec<String>> {
        let mut notes: Vec<String> = self
            .markdown_files(vault)?
            .into_iter()
            .map(|(relative, _)| relative)
            .collect();
        notes.sort();
        Ok(notes)
    }

    /// Case-insensitive literal search over note paths and note lines
    pub fn search_content(&self, vault: &Vault, term: &str) -> Result<Vec<NoteMatch>> {
        let pattern = literal_matcher(term)?;
        let mut matches = Vec::new();

        for (relative, path) in self.markdown_files(vault)? {
            if pattern.is_match(&relative) {
                matches.push(NoteMatch {
                    path: relative.clone(),
                    line: 0,
                    snippet: relative.clone(),
                });
            }
            self.scan_lines(&relative, &path, &pattern, &mut matches);
        }

        matches.sort_by(|a, b| a.path.cmp(&b.path).then(a.line.cmp(&b.line)));
        Ok(matches)
    }

    /// Lines in other notes linking to `note_name` with `[[name`
    pub fn find_mentions(&self, vault: &Vault, note_name: &str) -> Result<Vec<NoteMatch>> {
        let target = add_md_suffix(note_name);
        let stem = Path::new(&target)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let pattern = literal_matcher(&format!("[[{stem}"))?;

        let mut matches = Vec::new();
        for (relative, path) in self.markdown_files(vault)? {
            if relative == target {
                continue;
            }
            self.scan_lines(&relative, &path, &pattern, &mut matches);
        }

        matches.sort_by(|a, b| a.path.cmp(&b.path).then(a.line.cmp(&b.line)));
        Ok(matches)
    }

    fn markdown_files(&self, vault: &Vault) -> Result<Vec<(String, PathBuf)>> {
        let root = vault.root();
        if !root.is_dir() {
            return Err(NoteVaultError::vault_read(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root).min_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() || !is_markdown(entry.path()) {
                continue;
            }
            let Some(relative) = relative_display(root, entry.path()) else {
                continue;
            };
            if is_hidden_relative(&relative) {
                continue;
            }
            files.push((relative, entry.into_path()));
        }
        Ok(files)
    }

    fn scan_lines(&self, relative: &str, path: &Path, pattern: &Regex, out: &mut Vec<NoteMatch>) {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!("Skipping {}: {}", path.display(), e);
                return;
            }
        };

        for (index, line) in content.lines().enumerate() {
            if pattern.is_match(line) {
                out.push(NoteMatch {
                    path: relative.to_string(),
                    line: index + 1,
                    snippet: truncate(line.trim(), self.config.snippet_width),
                });
            }
        }
    }
}

impl Default for NoteStore {
    fn default() -> Self {
        Self::new()
    }
}

fn literal_matcher(term: &str) -> Result<Regex> {
    Ok(RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()?)
}

fn truncate(line: &str, width: usize) -> String {
    if line.chars().count() <= width {
        return line.to_string();
    }
    let kept: String = line.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Where a write to `path` must land: the link target for symlinked notes
fn resolve_write_target(vault: &Vault, path: &Path) -> Result<PathBuf> {
    let is_symlink = fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);
    if !is_symlink {
        return Ok(path.to_path_buf());
    }

    let target = fs::canonicalize(path)?;
    let root = fs::canonicalize(vault.root())?;
    if !target.starts_with(&root) {
        return Err(NoteVaultError::path_traversal(target.to_string_lossy()));
    }
    debug!("Writing through symlink {} to {}", path.display(), target.display());
    Ok(target)
}

#[cfg(unix)]
fn new_note_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_note_permissions() -> Option<fs::Permissions> {
    None
}

/// Write file atomically using a temporary file in the same directory
fn write_atomic(path: &Path, content: &str, permissions: Option<fs::Permissions>) -> Result<()> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp_file = NamedTempFile::new_in(parent_dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.flush()?;

    if let Some(permissions) = permissions {
        temp_file.as_file().set_permissions(permissions)?;
    }

    temp_file.persist(path).map_err(|e| {
        NoteVaultError::Io(std::io::Error::other(format!(
            "Failed to persist temporary file: {}",
            e
        )))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn create_vault() -> (TempDir, Vault) {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("projects")).unwrap();
        fs::create_dir_all(root.join(".trash")).unwrap();
        fs::write(root.join("inbox.md"), "Buy milk\n  Call Alice about the Meeting  \n").unwrap();
        fs::write(root.join("projects/meeting notes.md"), "# Agenda\nsee [[inbox]] later\n").unwrap();
        fs::write(root.join("projects/data.txt"), "meeting").unwrap();
        fs::write(root.join(".trash/old.md"), "meeting").unwrap();
        let vault = Vault::new("Test", root);
        (dir, vault)
    }

    #[test]
    fn test_read_adds_suffix() {
        let (_dir, vault) = create_vault();
        let store = NoteStore::new();
        assert!(store.read(&vault, "inbox").unwrap().starts_with("Buy milk"));
        assert!(store.read(&vault, "inbox.md").unwrap().starts_with("Buy milk"));
    }

    #[test]
    fn test_read_missing_note() {
        let (_dir, vault) = create_vault();
        let err = NoteStore::new().read(&vault, "nope").unwrap_err();
        assert!(matches!(err, NoteVaultError::NoteNotFound { ref path } if path == "nope.md"));
    }

    #[test]
    fn test_read_rejects_traversal() {
        let (_dir, vault) = create_vault();
        assert!(matches!(
            NoteStore::new().read(&vault, "../outside").unwrap_err(),
            NoteVaultError::PathTraversal { .. }
        ));
    }

    #[test]
    fn test_write_creates_parents() {
        let (dir, vault) = create_vault();
        let store = NoteStore::new();
        let path = store.write(&vault, "daily/2024/03-15", "hello").unwrap();
        assert_eq!(path, dir.path().join("daily/2024/03-15.md"));
        assert_eq!(fs::read_to_string(path).unwrap(), "hello");
    }

    #[test]
    fn test_write_overwrites_non_atomic() {
        let (_dir, vault) = create_vault();
        let store = NoteStore::with_config(NoteStoreConfig {
            atomic_writes: false,
            ..Default::default()
        });
        store.write(&vault, "inbox", "replaced").unwrap();
        assert_eq!(store.read(&vault, "inbox").unwrap(), "replaced");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let (dir, vault) = create_vault();
        let store = NoteStore::new();
        let inbox = dir.path().join("inbox.md");
        fs::set_permissions(&inbox, fs::Permissions::from_mode(0o640)).unwrap();

        store.write(&vault, "inbox", "replaced").unwrap();
        let mode = fs::metadata(&inbox).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);

        let created = store.write(&vault, "fresh", "new").unwrap();
        let mode = fs::metadata(created).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_through_symlink() {
        let (dir, vault) = create_vault();
        let link = dir.path().join("link.md");
        std::os::unix::fs::symlink(dir.path().join("inbox.md"), &link).unwrap();

        NoteStore::new().write(&vault, "link", "through").unwrap();
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(dir.path().join("inbox.md")).unwrap(), "through");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_refuses_symlink_out_of_vault() {
        let (dir, vault) = create_vault();
        let outside = TempDir::new().unwrap();
        let secret = outside.path().join("secret.md");
        fs::write(&secret, "keep").unwrap();
        std::os::unix::fs::symlink(&secret, dir.path().join("escape.md")).unwrap();

        assert!(matches!(
            NoteStore::new().write(&vault, "escape", "changed").unwrap_err(),
            NoteVaultError::PathTraversal { .. }
        ));
        assert_eq!(fs::read_to_string(secret).unwrap(), "keep");
    }

    #[test]
    fn test_list_notes() {
        let (_dir, vault) = create_vault();
        let notes = NoteStore::new().list_notes(&vault).unwrap();
        assert_eq!(notes, vec!["inbox.md", "projects/meeting notes.md"]);
    }

    #[test]
    fn test_search_content() {
        let (_dir, vault) = create_vault();
        let matches = NoteStore::new().search_content(&vault, "MEETING").unwrap();
        assert_eq!(
            matches,
            vec![
                NoteMatch {
                    path: "inbox.md".into(),
                    line: 2,
                    snippet: "Call Alice about the Meeting".into(),
                },
                NoteMatch {
                    path: "projects/meeting notes.md".into(),
                    line: 0,
                    snippet: "projects/meeting notes.md".into(),
                },
            ]
        );
        assert_eq!(matches[0].location(), "inbox.md:2");
        assert_eq!(matches[1].location(), "projects/meeting notes.md");
    }

    #[test]
    fn test_search_treats_term_literally() {
        let (_dir, vault) = create_vault();
        assert!(NoteStore::new().search_content(&vault, "[[").unwrap().len() == 1);
        assert!(NoteStore::new().search_content(&vault, "a.*z").unwrap().is_empty());
    }

    #[test]
    fn test_find_mentions() {
        let (_dir, vault) = create_vault();
        let mentions = NoteStore::new().find_mentions(&vault, "inbox").unwrap();
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].location(), "projects/meeting notes.md:2");
    }

    #[test]
    fn test_truncate_long_lines() {
        let long = "x".repeat(100);
        let short = truncate(&long, 80);
        assert_eq!(short.chars().count(), 80);
        assert!(short.ends_with("..."));
        assert_eq!(truncate("short", 80), "short");
    }
}
