//! Core note types and pure text operations
//!
//! Nothing in this module touches the filesystem:
//! - document: front matter parsing, formatting and key edits
//! - value: typed front matter values and literal interpretation
//! - filter: `key=value` metadata predicates
//! - content: escape normalization, append and exact replace
//! - date: daily-note pattern expansion
//! - path: vault-relative path validation

pub mod content;
pub mod date;
pub mod document;
pub mod filter;
pub mod path;
pub mod value;

pub use content::{append, normalize_escapes, replace, Replacement};
pub use date::{expand_date_pattern, is_daily_reference, DAILY_REFERENCE};
pub use document::{
    delete_key, format_front_matter, has_front_matter, set_key, Document, FrontMatterBlock,
    DELIMITER,
};
pub use filter::MetadataFilter;
pub use path::{add_md_suffix, contains_glob, validate_path};
pub use value::{FrontMatterValue, Scalar};
