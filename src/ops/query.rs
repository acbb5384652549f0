//! Read-only vault queries: listing, metadata filtering and searches

use crate::core::path::{contains_glob, is_markdown, validate_path};
use crate::core::{Document, MetadataFilter};
use crate::error::{NoteVaultError, Result};
use crate::io::finder::FuzzyFinder;
use crate::io::lister::EntryLister;
use crate::io::notes::{NoteMatch, NoteStore};
use crate::io::vault::Vault;
use log::{debug, warn};
use std::fs;
use std::path::Path;

/// Parameters for [`list_entries`]
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    /// Directory or glob pattern, relative to the vault root
    pub path: String,
    /// Prefix every entry with the directory it was listed from
    pub full_path: bool,
    /// Keep only notes whose front matter satisfies every predicate
    pub filter: MetadataFilter,
}

/// List a directory or resolve a glob, optionally filtered by front matter
pub fn list_entries(vault: &Vault, lister: &EntryLister, params: &ListParams) -> Result<Vec<String>> {
    let root = vault.root();
    let is_glob = contains_glob(&params.path);

    let (entries, base) = if is_glob {
        (lister.glob(root, &params.path)?, root.to_path_buf())
    } else {
        (
            lister.list(root, &params.path)?,
            validate_path(root, &params.path)?,
        )
    };

    let entries = if params.filter.is_empty() {
        entries
    } else {
        entries
            .into_iter()
            .filter(|entry| !entry.ends_with('/') && note_matches(&base.join(entry), &params.filter))
            .collect()
    };

    if !params.full_path {
        return Ok(entries);
    }
    Ok(entries
        .into_iter()
        .map(|entry| base.join(entry).to_string_lossy().into_owned())
        .collect())
}

/// Pick one note interactively, optionally restricted by front matter
pub fn search_notes<F: FuzzyFinder>(
    vault: &Vault,
    store: &NoteStore,
    finder: &F,
    filter: &MetadataFilter,
) -> Result<String> {
    let mut notes = store.list_notes(vault)?;
    if !filter.is_empty() {
        notes.retain(|note| note_matches(&vault.root().join(note), filter));
    }
    if notes.is_empty() {
        return Err(NoteVaultError::NoNotesFound);
    }

    let index = finder.find(&notes, |note| note.clone())?;
    Ok(notes[index].clone())
}

/// Search note paths and lines for `term`, returning the chosen note path.
///
/// No match gives `None`; a single match is returned without asking.
pub fn search_content<F: FuzzyFinder>(
    vault: &Vault,
    store: &NoteStore,
    finder: &F,
    term: &str,
) -> Result<Option<String>> {
    let matches = store.search_content(vault, term)?;
    match matches.as_slice() {
        [] => Ok(None),
        [only] => Ok(Some(only.path.clone())),
        _ => {
            let lines = format_matches(&matches);
            let index = finder.find(&lines, |line| line.clone())?;
            Ok(Some(matches[index].path.clone()))
        }
    }
}

/// Display lines `location | snippet`, locations padded to the widest one
pub fn format_matches(matches: &[NoteMatch]) -> Vec<String> {
    let width = matches
        .iter()
        .map(|m| m.location().chars().count())
        .max()
        .unwrap_or(0);

    matches
        .iter()
        .map(|m| format!("{:<width$} | {}", m.location(), m.snippet))
        .collect()
}

/// Best-effort filter check: unreadable, non-note or unparsable files never match
fn note_matches(path: &Path, filter: &MetadataFilter) -> bool {
    if !is_markdown(path) {
        return false;
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Skipping {} during filtering: {}", path.display(), e);
            return false;
        }
    };

    let document = match Document::parse(&content) {
        Ok(document) => document,
        Err(e) => {
            warn!("Skipping {} during filtering: {}", path.display(), e);
            return false;
        }
    };

    let matched = document
        .front_matter()
        .is_some_and(|fm| filter.matches(fm));
    debug!("{} filter match: {}", path.display(), matched);
    matched
}
