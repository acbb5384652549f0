//! Plain-text content edits: escape normalization, append and exact replace

use crate::error::{NoteVaultError, Result};

/// Convert textual escape pairs (`\n`, `\r`, `\t`, `\\`, `\"`, `\'`) into the
/// characters they stand for.
///
/// A single left-to-right pass: the output of one replacement is never scanned
/// again, so `\\n` becomes a backslash followed by `n`.
pub fn normalize_escapes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let replacement = match chars.peek() {
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('\\') => '\\',
            Some('"') => '"',
            Some('\'') => '\'',
            _ => {
                out.push(c);
                continue;
            }
        };
        chars.next();
        out.push(replacement);
    }
    out
}

/// Concatenate the normalized addition onto existing content
pub fn append(existing: &str, addition: &str) -> String {
    let mut updated = String::with_capacity(existing.len() + addition.len());
    updated.push_str(existing);
    updated.push_str(&normalize_escapes(addition));
    updated
}

/// Result of a successful [`replace`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub content: String,
    pub occurrences: usize,
}

/// Replace exact occurrences of `old` with `new`.
///
/// Without `replace_all` the match must be unique; otherwise the call fails with
/// [`NoteVaultError::AmbiguousMatch`] carrying the real occurrence count.
pub fn replace(existing: &str, old: &str, new: &str, replace_all: bool) -> Result<Replacement> {
    if old == new {
        return Err(NoteVaultError::IdenticalStrings);
    }
    if old.is_empty() {
        return Err(NoteVaultError::EmptyOldString);
    }

    let occurrences = existing.matches(old).count();
    match occurrences {
        0 => Err(NoteVaultError::string_not_found(old)),
        1 => Ok(Replacement {
            content: existing.replacen(old, new, 1),
            occurrences,
        }),
        count if !replace_all => Err(NoteVaultError::AmbiguousMatch { count }),
        _ => Ok(Replacement {
            content: existing.replace(old, new),
            occurrences,
        }),
    }
}
