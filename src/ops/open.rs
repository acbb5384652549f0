//! Opening and printing notes, and the `@daily` reference

use crate::core::date::{expand_date_pattern, is_daily_reference};
use crate::error::{NoteVaultError, Result};
use crate::io::config::ConfigStore;
use crate::io::launcher::{UriLauncher, UriParams, CREATE_URI, DAILY_URI, OPEN_URI};
use crate::io::notes::NoteStore;
use crate::io::vault::Vault;
use chrono::NaiveDate;
use log::debug;

/// Parameters for [`open_note`]
#[derive(Debug, Clone, Default)]
pub struct OpenParams {
    pub note_name: String,
    /// Heading to jump to inside the note
    pub section: Option<String>,
    pub create_if_not_exist: bool,
}

/// Parameters for [`print_note`]
#[derive(Debug, Clone, Default)]
pub struct PrintParams {
    pub note_name: String,
    /// Append the lines of other notes that link here
    pub include_mentions: bool,
}

/// Open a note in the companion app, optionally creating it first
pub fn open_note<U: UriLauncher>(vault: &Vault, uri: &U, params: &OpenParams) -> Result<()> {
    if params.create_if_not_exist {
        let create = UriParams::from([
            ("vault", vault.name().to_string()),
            ("file", params.note_name.clone()),
            ("append", "false".to_string()),
            ("overwrite", "false".to_string()),
            ("content", String::new()),
            ("silent", "true".to_string()),
        ]);
        uri.execute(&uri.construct(CREATE_URI, &create))?;
    }

    let file = match params.section.as_deref().filter(|s| !s.is_empty()) {
        Some(section) => format!("{}#{}", params.note_name, section),
        None => params.note_name.clone(),
    };
    let open = UriParams::from([("vault", vault.name().to_string()), ("file", file)]);
    uri.execute(&uri.construct(OPEN_URI, &open))
}

/// Open today's daily note.
///
/// Uses the configured pattern when there is one; otherwise the companion
/// app's own daily-note handler.
pub fn daily_note<U: UriLauncher>(
    vault: &Vault,
    uri: &U,
    config: &dyn ConfigStore,
    today: NaiveDate,
) -> Result<()> {
    match resolve_daily_note(config, today) {
        Ok(note_name) => open_note(
            vault,
            uri,
            &OpenParams {
                note_name,
                ..Default::default()
            },
        ),
        Err(NoteVaultError::DailyPatternNotConfigured) => {
            debug!("No daily pattern configured, using {}", DAILY_URI);
            let query = UriParams::from([("vault", vault.name().to_string())]);
            uri.execute(&uri.construct(DAILY_URI, &query))
        }
        Err(e) => Err(e),
    }
}

/// Note name of the daily note for `today`
pub fn resolve_daily_note(config: &dyn ConfigStore, today: NaiveDate) -> Result<String> {
    let pattern = config.daily_note_pattern()?;
    Ok(expand_date_pattern(&pattern, today))
}

/// Replace `@daily` with today's daily note name; any other name is returned as is
pub fn resolve_note_name(
    note_name: &str,
    config: &dyn ConfigStore,
    today: NaiveDate,
) -> Result<String> {
    if is_daily_reference(note_name) {
        resolve_daily_note(config, today)
    } else {
        Ok(note_name.to_string())
    }
}

/// Point a missing `@daily` note at the command that creates it
pub fn wrap_daily_note_error(original_name: &str, err: NoteVaultError) -> NoteVaultError {
    match err {
        NoteVaultError::NoteNotFound { path } if is_daily_reference(original_name) => {
            NoteVaultError::DailyNoteNotFound { path }
        }
        other => other,
    }
}

/// Raw note content, optionally followed by a "Linked Mentions" section
pub fn print_note(vault: &Vault, store: &NoteStore, params: &PrintParams) -> Result<String> {
    let mut content = store.read(vault, &params.note_name)?;
    if !params.include_mentions {
        return Ok(content);
    }

    let mentions = store.find_mentions(vault, &params.note_name)?;
    if mentions.is_empty() {
        return Ok(content);
    }

    if !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str("\n## Linked Mentions\n\n");
    for mention in mentions {
        content.push_str(&format!("- {} | {}\n", mention.location(), mention.snippet));
    }
    Ok(content)
}
