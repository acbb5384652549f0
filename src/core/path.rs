//! Vault-relative path handling
//!
//! Every caller-supplied path is checked against the vault root before it
//! touches the filesystem. The check is lexical: any `..` segment is refused
//! outright, and the joined path must still sit under the normalized root.

use crate::error::{NoteVaultError, Result};
use std::path::{Component, Path, PathBuf};

/// Markdown extension appended to bare note names
pub const NOTE_EXTENSION: &str = ".md";

/// Resolve `relative` under `root`, refusing anything that could escape it.
///
/// An empty (or whitespace-only) relative path resolves to the root itself.
pub fn validate_path(root: &Path, relative: &str) -> Result<PathBuf> {
    let root = normalize(root);
    if relative.trim().is_empty() {
        return Ok(root);
    }

    let rel = Path::new(relative);
    if rel
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(NoteVaultError::path_traversal(relative));
    }

    let resolved = normalize(&root.join(rel));
    if !resolved.starts_with(&root) {
        return Err(NoteVaultError::path_traversal(relative));
    }
    Ok(resolved)
}

/// Check for glob metacharacters (`*`, `?`, `[`)
pub fn contains_glob(path: &str) -> bool {
    path.contains(['*', '?', '['])
}

/// Append `.md` unless the name already ends with it
pub fn add_md_suffix(note_name: &str) -> String {
    if note_name.ends_with(NOTE_EXTENSION) {
        note_name.to_string()
    } else {
        format!("{note_name}{NOTE_EXTENSION}")
    }
}

/// Check if a path names a markdown note
pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
        .unwrap_or(false)
}

/// Render a path relative to `root` with `/` separators
pub fn relative_display(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    Some(parts.join("/"))
}

/// Check for a hidden segment anywhere in a `/`-separated relative path
pub fn is_hidden_relative(relative: &str) -> bool {
    relative.starts_with('.') || relative.contains("/.")
}

/// Drop `.` components without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
