//! Note mutations: append, exact replace, front matter edits and creation
//!
//! Each action is one read-modify-write cycle through [`NoteStore`] and returns
//! a short message describing what changed.

use crate::core::content::{append, normalize_escapes, replace};
use crate::core::document::{delete_key, format_front_matter, set_key, Document};
use crate::error::{NoteVaultError, Result};
use crate::io::launcher::{EditorLauncher, UriLauncher, UriParams, CREATE_URI, OPEN_URI};
use crate::io::notes::NoteStore;
use crate::io::vault::Vault;
use log::{debug, info};

/// Parameters for [`append_to_note`]
#[derive(Debug, Clone)]
pub struct AppendParams {
    pub note_name: String,
    pub content: String,
}

/// Parameters for [`edit_note`]
#[derive(Debug, Clone)]
pub struct EditParams {
    pub note_name: String,
    pub old_string: String,
    pub new_string: String,
    pub replace_all: bool,
}

impl EditParams {
    /// Reject requests that can never succeed, before any file is read
    pub fn validate(&self) -> Result<()> {
        if self.old_string == self.new_string {
            return Err(NoteVaultError::IdenticalStrings);
        }
        if self.old_string.is_empty() {
            return Err(NoteVaultError::EmptyOldString);
        }
        Ok(())
    }
}

/// Parameters for [`create_note`]
#[derive(Debug, Clone, Default)]
pub struct CreateParams {
    pub note_name: String,
    pub content: String,
    pub append: bool,
    pub overwrite: bool,
    /// Open the note once written
    pub open: bool,
    /// Open in `$EDITOR` rather than the companion app
    pub use_editor: bool,
}

/// Append escape-normalized text to an existing note
pub fn append_to_note(vault: &Vault, store: &NoteStore, params: &AppendParams) -> Result<String> {
    let existing = store.read(vault, &params.note_name)?;
    let updated = append(&existing, &params.content);
    store.write(vault, &params.note_name, &updated)?;

    info!("Appended {} bytes to {}", updated.len() - existing.len(), params.note_name);
    Ok(format!("Appended content to {}", params.note_name))
}

/// Replace an exact string inside a note
pub fn edit_note(vault: &Vault, store: &NoteStore, params: &EditParams) -> Result<String> {
    params.validate()?;

    let existing = store.read(vault, &params.note_name)?;
    let replacement = replace(
        &existing,
        &params.old_string,
        &params.new_string,
        params.replace_all,
    )?;
    store.write(vault, &params.note_name, &replacement.content)?;

    let noun = if replacement.occurrences > 1 {
        "occurrences"
    } else {
        "occurrence"
    };
    info!("Edited {}", params.note_name);
    Ok(format!(
        "Replaced {} {} in {}",
        replacement.occurrences, noun, params.note_name
    ))
}

/// Upsert one front matter key; `value` is interpreted as a literal
pub fn set_frontmatter(
    vault: &Vault,
    store: &NoteStore,
    note_name: &str,
    key: &str,
    value: &str,
) -> Result<String> {
    let existing = store.read(vault, note_name)?;
    let updated = set_key(&existing, key, value)?;
    store.write(vault, note_name, &updated)?;
    Ok(format!("Set {key} in {note_name}"))
}

/// Remove one front matter key
pub fn delete_frontmatter(
    vault: &Vault,
    store: &NoteStore,
    note_name: &str,
    key: &str,
) -> Result<String> {
    let existing = store.read(vault, note_name)?;
    let updated = delete_key(&existing, key)?;
    store.write(vault, note_name, &updated)?;
    Ok(format!("Deleted {key} from {note_name}"))
}

/// The note's front matter as YAML
pub fn print_frontmatter(vault: &Vault, store: &NoteStore, note_name: &str) -> Result<String> {
    let content = store.read(vault, note_name)?;
    let document = Document::parse(&content)?;
    match document.front_matter() {
        Some(fm) => format_front_matter(Some(fm)),
        None => Err(NoteVaultError::NoFrontMatter),
    }
}

/// Create a note, or append to or overwrite an existing one.
///
/// An existing note with neither `append` nor `overwrite` is handed to the
/// companion app's create URI, which decides how to resolve the clash.
pub fn create_note<U, E>(
    vault: &Vault,
    store: &NoteStore,
    uri: &U,
    editor: &E,
    params: &CreateParams,
) -> Result<()>
where
    U: UriLauncher,
    E: EditorLauncher,
{
    let content = normalize_escapes(&params.content);
    let exists = store.exists(vault, &params.note_name)?;

    if exists && !params.append && !params.overwrite {
        debug!("{} exists, delegating to companion app", params.note_name);
        let query = UriParams::from([
            ("vault", vault.name().to_string()),
            ("file", params.note_name.clone()),
            ("content", content),
            ("silent", (!params.open).to_string()),
        ]);
        return uri.execute(&uri.construct(CREATE_URI, &query));
    }

    let updated = if exists && params.append {
        let existing = store.read(vault, &params.note_name)?;
        format!("{existing}{content}")
    } else {
        content
    };
    let path = store.write(vault, &params.note_name, &updated)?;
    info!("Created {}", path.display());

    if !params.open {
        return Ok(());
    }
    if params.use_editor {
        return editor.open_in_editor(&path);
    }
    let query = UriParams::from([
        ("vault", vault.name().to_string()),
        ("file", params.note_name.clone()),
    ]);
    uri.execute(&uri.construct(OPEN_URI, &query))
}
