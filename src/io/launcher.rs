//! Handing notes to other programs: the companion app (via URI) and `$EDITOR`

use crate::error::{NoteVaultError, Result};
use log::debug;
use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;

/// Open an existing note
pub const OPEN_URI: &str = "obsidian://open";
/// Create (or append to, or overwrite) a note
pub const CREATE_URI: &str = "obsidian://new";
/// Open the companion app's own daily note
pub const DAILY_URI: &str = "obsidian://daily";

/// Query parameters for a companion URI, iterated in key order
pub type UriParams = BTreeMap<&'static str, String>;

/// Builds companion URIs and asks the OS to open them
pub trait UriLauncher {
    /// Join `base` and the non-empty `params` into a query string
    fn construct(&self, base: &str, params: &UriParams) -> String {
        construct_uri(base, params)
    }

    fn execute(&self, uri: &str) -> Result<()>;
}

/// Opens a file in an external editor
pub trait EditorLauncher {
    fn open_in_editor(&self, path: &Path) -> Result<()>;
}

/// `base?key=value&...` with keys sorted, empty values dropped and values
/// percent-encoded (spaces as `%20`)
pub fn construct_uri(base: &str, params: &UriParams) -> String {
    let query: Vec<String> = params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect();

    if query.is_empty() {
        base.to_string()
    } else {
        format!("{}?{}", base, query.join("&"))
    }
}

/// Hands URIs to the platform's default handler
#[derive(Debug, Clone, Default)]
pub struct SystemUriLauncher;

impl UriLauncher for SystemUriLauncher {
    fn execute(&self, uri: &str) -> Result<()> {
        debug!("Opening {}", uri);
        open::that(uri).map_err(|e| NoteVaultError::launch("open", e.to_string()))
    }
}

/// Runs `$EDITOR` (or `vim`) with inherited stdio
#[derive(Debug, Clone, Default)]
pub struct SystemEditor;

impl SystemEditor {
    pub const DEFAULT_EDITOR: &'static str = "vim";

    /// Program and leading arguments from `$EDITOR`, e.g. `code --wait`
    pub fn editor_command() -> Vec<String> {
        let configured = std::env::var("EDITOR").unwrap_or_default();
        let parts: Vec<String> = configured.split_whitespace().map(str::to_string).collect();
        if parts.is_empty() {
            vec![Self::DEFAULT_EDITOR.to_string()]
        } else {
            parts
        }
    }
}

impl EditorLauncher for SystemEditor {
    fn open_in_editor(&self, path: &Path) -> Result<()> {
        let parts = Self::editor_command();
        let (program, args) = parts
            .split_first()
            .ok_or_else(|| NoteVaultError::launch("editor", "no editor configured"))?;

        debug!("Opening {} in {}", path.display(), program);
        let status = Command::new(program)
            .args(args)
            .arg(path)
            .status()
            .map_err(|e| NoteVaultError::launch(program.as_str(), e.to_string()))?;

        if !status.success() {
            return Err(NoteVaultError::launch(
                program.as_str(),
                format!("exited with {status}"),
            ));
        }
        Ok(())
    }
}
