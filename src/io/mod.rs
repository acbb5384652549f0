//! Filesystem and process boundaries
//!
//! - lister: directory listing and glob matching
//! - notes: note reads, atomic writes and content search
//! - vault: vault identity and registry lookup
//! - config: persisted CLI preferences
//! - launcher: companion URIs and the external editor
//! - finder: interactive `fzf` selection

pub mod config;
pub mod finder;
pub mod launcher;
pub mod lister;
pub mod notes;
pub mod vault;

pub use config::{CliConfig, ConfigStore, ConfigUpdate, JsonConfigStore};
pub use finder::{FuzzyFinder, FzfFinder};
pub use launcher::{
    construct_uri, EditorLauncher, SystemEditor, SystemUriLauncher, UriLauncher, UriParams,
    CREATE_URI, DAILY_URI, OPEN_URI,
};
pub use lister::{EntryLister, ListerConfig};
pub use notes::{NoteMatch, NoteStore, NoteStoreConfig};
pub use vault::{Vault, VaultRegistry};
