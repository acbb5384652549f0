//! notevault: query and edit a vault of Markdown notes from the command line
//!
//! A vault is a directory of Markdown notes, optionally carrying a YAML front
//! matter block. This library lists and globs vault entries without ever leaving
//! the vault root, filters notes by front matter, searches note content, and
//! performs small, exact edits (append, replace, set or delete a key). Opening
//! notes is delegated to a companion application through its URI scheme or to
//! `$EDITOR`.
//!
//! # Features
//!
//! - **Path-safe listing and globbing** relative to the vault root
//! - **Front matter codec** with typed values and `key=value` filters
//! - **Exact-string edits** with occurrence accounting
//! - **Daily notes** from a date pattern (`daily/YYYY-MM-DD`)
//! - **Atomic note writes** through a temp file and rename
//! - **Pluggable collaborators** for URIs, the editor, `fzf` and preferences
//!
//! # Quick Start
//!
//! ## Editing Front Matter
//!
//! ```rust
//! use notevault::{delete_key, set_key, Document, Result};
//!
//! fn main() -> Result<()> {
//!     let content = set_key("# Hello\n", "tags", "[rust, notes]")?;
//!     let document = Document::parse(&content)?;
//!     assert_eq!(document.body(), "# Hello\n");
//!
//!     let content = delete_key(&content, "tags")?;
//!     assert_eq!(content, "# Hello\n");
//!     Ok(())
//! }
//! ```
//!
//! ## Listing a Vault
//!
//! ```rust,no_run
//! use notevault::{list_entries, EntryLister, ListParams, MetadataFilter, Result, Vault};
//!
//! fn main() -> Result<()> {
//!     let vault = Vault::new("Notes", "/home/me/Notes");
//!     let params = ListParams {
//!         path: "**/*.md".to_string(),
//!         filter: MetadataFilter::parse(&["status=active"])?,
//!         ..Default::default()
//!     };
//!     for entry in list_entries(&vault, &EntryLister::new(), &params)? {
//!         println!("{entry}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Editing Notes
//!
//! ```rust,no_run
//! use notevault::{edit_note, EditParams, NoteStore, Result, Vault};
//!
//! fn main() -> Result<()> {
//!     let vault = Vault::new("Notes", "/home/me/Notes");
//!     let params = EditParams {
//!         note_name: "Todo".to_string(),
//!         old_string: "- [ ] ship".to_string(),
//!         new_string: "- [x] ship".to_string(),
//!         replace_all: false,
//!     };
//!     println!("{}", edit_note(&vault, &NoteStore::new(), &params)?);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`core`]: pure text operations (front matter, filters, edits, dates, paths)
//! - [`io`]: filesystem and process boundaries (lister, note store, vault
//!   registry, preferences, launchers, fuzzy finder)
//! - [`ops`]: vault actions composed from the two
//! - [`error`]: the library error type

// Public API exports
pub use error::{ErrorSeverity, NoteVaultError, Result};

// Core types
pub use core::{
    append, delete_key, expand_date_pattern, format_front_matter, has_front_matter,
    normalize_escapes, replace, set_key, Document, FrontMatterBlock, FrontMatterValue,
    MetadataFilter, Replacement, Scalar,
};

// IO types
pub use io::{
    CliConfig, ConfigStore, ConfigUpdate, EditorLauncher, EntryLister, FuzzyFinder, FzfFinder,
    JsonConfigStore, ListerConfig, NoteMatch, NoteStore, NoteStoreConfig, SystemEditor,
    SystemUriLauncher, UriLauncher, UriParams, Vault, VaultRegistry,
};

// Actions
pub use ops::{
    append_to_note, create_note, daily_note, delete_frontmatter, edit_note, list_entries,
    open_note, print_frontmatter, print_note, search_content, search_notes, set_frontmatter,
    AppendParams, CreateParams, EditParams, ListParams, OpenParams, PrintParams,
};

pub mod core;
pub mod error;
pub mod io;
pub mod ops;

// CLI components are available only in the binary, not as part of the library API

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_end_to_end_workflow() {
        let dir = TempDir::new().unwrap();
        let vault = Vault::new("Test", dir.path());
        let store = NoteStore::new();
        store
            .write(&vault, "projects/alpha", "# Alpha\n\nStatus: draft\n")
            .unwrap();

        set_frontmatter(&vault, &store, "projects/alpha", "status", "active").unwrap();
        edit_note(
            &vault,
            &store,
            &EditParams {
                note_name: "projects/alpha".into(),
                old_string: "draft".into(),
                new_string: "final".into(),
                replace_all: false,
            },
        )
        .unwrap();

        let content = fs::read_to_string(dir.path().join("projects/alpha.md")).unwrap();
        assert_eq!(content, "---\nstatus: active\n---\n# Alpha\n\nStatus: final\n");

        let params = ListParams {
            path: "**/*.md".into(),
            filter: MetadataFilter::new().with("status", "active"),
            ..Default::default()
        };
        let entries = list_entries(&vault, &EntryLister::new(), &params).unwrap();
        assert_eq!(entries, vec!["projects/alpha.md"]);
    }

    #[test]
    fn test_error_handling() {
        let dir = TempDir::new().unwrap();
        let vault = Vault::new("Test", dir.path());
        let result = NoteStore::new().read(&vault, "missing");
        assert!(matches!(result.unwrap_err(), NoteVaultError::NoteNotFound { .. }));
    }
}
