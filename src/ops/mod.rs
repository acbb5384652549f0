//! Vault actions composed from the core text operations and the io layer
//!
//! Every action takes the resolved [`Vault`](crate::io::Vault) plus whichever
//! collaborators it needs, so callers (and tests) choose the implementations.

pub mod mutate;
pub mod open;
pub mod query;

pub use mutate::{
    append_to_note, create_note, delete_frontmatter, edit_note, print_frontmatter,
    set_frontmatter, AppendParams, CreateParams, EditParams,
};
pub use open::{
    daily_note, open_note, print_note, resolve_daily_note, resolve_note_name,
    wrap_daily_note_error, OpenParams, PrintParams,
};
pub use query::{format_matches, list_entries, search_content, search_notes, ListParams};
