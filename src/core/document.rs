//! Core document model for front matter manipulation
//!
//! A note is raw UTF-8 text split into an optional front matter block and a body.
//! The block starts when the first line, trimmed, is `---` and ends at the next
//! line that trims to `---`; the body is everything after that closing line.
//!
//! The free functions at the bottom ([`set_key`], [`delete_key`]) work on whole
//! note contents so callers can do a plain read-modify-write cycle.

use crate::core::value::{key_to_string, to_mapping, FrontMatterValue};
use crate::error::{NoteVaultError, Result};
use std::collections::BTreeMap;

/// Front matter delimiter line
pub const DELIMITER: &str = "---";

/// Parsed front matter: keys in sorted order
pub type FrontMatterBlock = BTreeMap<String, FrontMatterValue>;

/// Represents a markdown note with optional front matter and body
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    front_matter: Option<FrontMatterBlock>,
    body: String,
}

impl Document {
    /// Create a new document with optional front matter and body
    pub fn new(front_matter: Option<FrontMatterBlock>, body: impl Into<String>) -> Self {
        Self {
            front_matter,
            body: body.into(),
        }
    }

    /// Parse note content.
    ///
    /// Content without a leading delimiter is not an error: the document simply
    /// has no front matter and the whole input is the body.
    pub fn parse(content: &str) -> Result<Self> {
        let (yaml, body) = match split_block(content)? {
            Some(parts) => parts,
            None => return Ok(Self::new(None, content)),
        };

        let front_matter = parse_block(yaml)?;
        Ok(Self::new(Some(front_matter), body))
    }

    /// Get the front matter as a reference
    pub fn front_matter(&self) -> Option<&FrontMatterBlock> {
        self.front_matter.as_ref()
    }

    /// Get the body content
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Get a single front matter value
    pub fn get(&self, key: &str) -> Option<&FrontMatterValue> {
        self.front_matter.as_ref()?.get(key)
    }

    /// Insert or replace a key, creating the block when missing
    pub fn set(&mut self, key: impl Into<String>, value: FrontMatterValue) {
        self.front_matter
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value);
    }

    /// Remove a key; removing an absent key is a no-op
    pub fn remove(&mut self, key: &str) -> Option<FrontMatterValue> {
        self.front_matter.as_mut()?.remove(key)
    }

    /// Drop the block when it no longer holds any key
    pub fn clean_empty_front_matter(&mut self) {
        if self.front_matter.as_ref().is_some_and(|fm| fm.is_empty()) {
            self.front_matter = None;
        }
    }

    /// Serialize the document back into note content
    pub fn render(&self) -> Result<String> {
        match self.front_matter.as_ref() {
            Some(fm) => {
                let yaml = format_front_matter(Some(fm))?;
                Ok(wrap_block(&yaml, &self.body))
            }
            None => Ok(self.body.clone()),
        }
    }
}

/// Purely syntactic check: the first line, trimmed, is the delimiter
pub fn has_front_matter(content: &str) -> bool {
    content
        .split('\n')
        .next()
        .is_some_and(|first| first.trim() == DELIMITER)
}

/// Serialize a block to YAML; absent or empty blocks format to an empty string
pub fn format_front_matter(front_matter: Option<&FrontMatterBlock>) -> Result<String> {
    match front_matter {
        Some(fm) if !fm.is_empty() => {
            let mapping = to_mapping(fm.iter());
            Ok(serde_yaml::to_string(&mapping)?)
        }
        _ => Ok(String::new()),
    }
}

/// Upsert `key` in the note's front matter.
///
/// The value literal goes through [`FrontMatterValue::parse_literal`]. A note
/// without a block gets a new one wrapping its entire original content.
pub fn set_key(content: &str, key: &str, value: &str) -> Result<String> {
    let value = FrontMatterValue::parse_literal(value);

    if !has_front_matter(content) {
        let mut fm = FrontMatterBlock::new();
        fm.insert(key.to_string(), value);
        let yaml = format_front_matter(Some(&fm))?;
        return Ok(wrap_block(&yaml, content));
    }

    let mut document = Document::parse(content)?;
    document.set(key, value);
    document.render()
}

/// Remove `key` from the note's front matter.
///
/// When the block ends up empty the delimiters are stripped and only the body is
/// returned.
pub fn delete_key(content: &str, key: &str) -> Result<String> {
    if !has_front_matter(content) {
        return Err(NoteVaultError::NoFrontMatter);
    }

    let mut document = Document::parse(content)?;
    document.remove(key);
    document.clean_empty_front_matter();

    if document.front_matter().is_none() {
        let body = document.body();
        return Ok(body.strip_prefix('\n').unwrap_or(body).to_string());
    }
    document.render()
}

fn wrap_block(yaml: &str, body: &str) -> String {
    format!("{DELIMITER}\n{yaml}{DELIMITER}\n{body}")
}

/// Locate the YAML text and the body. `Ok(None)` means there is no block.
fn split_block(content: &str) -> Result<Option<(&str, &str)>> {
    let mut lines = content.split_inclusive('\n');
    let first = match lines.next() {
        Some(line) if line.trim() == DELIMITER => line,
        _ => return Ok(None),
    };

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim() == DELIMITER {
            let yaml = &content[yaml_start..offset];
            let body = &content[offset + line.len()..];
            return Ok(Some((yaml, body)));
        }
        offset += line.len();
    }

    Err(NoteVaultError::invalid_front_matter(
        "missing closing delimiter",
    ))
}

fn parse_block(yaml: &str) -> Result<FrontMatterBlock> {
    if yaml.trim().is_empty() {
        return Ok(FrontMatterBlock::new());
    }

    let value: serde_yaml::Value = serde_yaml::from_str(yaml)
        .map_err(|e| NoteVaultError::invalid_front_matter(e.to_string()))?;

    match value {
        serde_yaml::Value::Mapping(map) => {
            let mut fm = FrontMatterBlock::new();
            for (k, v) in map {
                let key = key_to_string(&k).ok_or_else(|| {
                    NoteVaultError::invalid_front_matter(format!("unsupported key: {:?}", k))
                })?;
                fm.insert(key, FrontMatterValue::from_yaml(v));
            }
            Ok(fm)
        }
        serde_yaml::Value::Null => Ok(FrontMatterBlock::new()),
        other => Err(NoteVaultError::invalid_front_matter(format!(
            "expected a mapping, found {:?}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NOTE: &str = "---\ntitle: Test Note\ntags:\n- rust\n- cli\n---\n# Heading\n\nBody text.\n";

    #[test]
    fn test_parse_with_front_matter() {
        let doc = Document::parse(NOTE).unwrap();
        let fm = doc.front_matter().unwrap();
        assert_eq!(fm.len(), 2);
        assert_eq!(doc.get("title").unwrap().as_str(), Some("Test Note"));
        assert_eq!(doc.get("tags"), Some(&FrontMatterValue::string_list(["rust", "cli"])));
        assert_eq!(doc.body(), "# Heading\n\nBody text.\n");
    }

    #[test]
    fn test_parse_without_front_matter() {
        let content = "# Just a note\n---\nnot: frontmatter\n";
        let doc = Document::parse(content).unwrap();
        assert!(doc.front_matter().is_none());
        assert_eq!(doc.body(), content);
    }

    #[test]
    fn test_parse_empty_block_is_present() {
        let doc = Document::parse("---\n---\nbody").unwrap();
        assert_eq!(doc.front_matter(), Some(&FrontMatterBlock::new()));
        assert_eq!(doc.body(), "body");
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let content = "---\ntitle: \"unterminated\ntags: [a, b\n---\nbody";
        let err = Document::parse(content).unwrap_err();
        assert!(matches!(err, NoteVaultError::InvalidFrontMatter { .. }));
    }

    #[test]
    fn test_parse_non_mapping_block() {
        let err = Document::parse("---\n- a\n- b\n---\n").unwrap_err();
        assert!(matches!(err, NoteVaultError::InvalidFrontMatter { .. }));
    }

    #[test]
    fn test_parse_unterminated_block() {
        let err = Document::parse("---\ntitle: x\nno closing line").unwrap_err();
        assert!(matches!(err, NoteVaultError::InvalidFrontMatter { .. }));
    }

    #[test]
    fn test_parse_crlf_delimiters() {
        let doc = Document::parse("---\r\ntitle: x\r\n---\r\nbody\r\n").unwrap();
        assert_eq!(doc.get("title").unwrap().as_str(), Some("x"));
        assert_eq!(doc.body(), "body\r\n");
    }

    #[test]
    fn test_has_front_matter_is_syntactic() {
        assert!(has_front_matter("---\ntitle: x\n---\n"));
        assert!(has_front_matter("  ---  \nbroken: [\n"));
        assert!(!has_front_matter("# title\n---\n"));
        assert!(!has_front_matter(""));
    }

    #[test]
    fn test_format_front_matter() {
        assert_eq!(format_front_matter(None).unwrap(), "");
        assert_eq!(format_front_matter(Some(&FrontMatterBlock::new())).unwrap(), "");

        let mut fm = FrontMatterBlock::new();
        fm.insert("title".to_string(), FrontMatterValue::string("Hello"));
        fm.insert("draft".to_string(), FrontMatterValue::bool(true));
        assert_eq!(format_front_matter(Some(&fm)).unwrap(), "draft: true\ntitle: Hello\n");
    }

    #[test]
    fn test_set_key_creates_block() {
        let updated = set_key("Some content", "author", "John").unwrap();
        assert_eq!(updated, "---\nauthor: John\n---\nSome content");

        let doc = Document::parse(&updated).unwrap();
        assert_eq!(doc.get("author").unwrap().as_str(), Some("John"));
    }

    #[test]
    fn test_set_key_updates_existing_block() {
        let updated = set_key(NOTE, "title", "Renamed").unwrap();
        let doc = Document::parse(&updated).unwrap();
        assert_eq!(doc.get("title").unwrap().as_str(), Some("Renamed"));
        assert_eq!(doc.get("tags"), Some(&FrontMatterValue::string_list(["rust", "cli"])));
        assert_eq!(doc.body(), "# Heading\n\nBody text.\n");
    }

    #[test]
    fn test_set_key_interprets_literals() {
        let updated = set_key(NOTE, "draft", "false").unwrap();
        let updated = set_key(&updated, "aliases", "[one, two]").unwrap();
        let doc = Document::parse(&updated).unwrap();
        assert_eq!(doc.get("draft").unwrap().as_bool(), Some(false));
        assert_eq!(doc.get("aliases"), Some(&FrontMatterValue::string_list(["one", "two"])));
    }

    #[test]
    fn test_set_key_rejects_broken_block() {
        let err = set_key("---\ntitle: [\n---\n", "a", "b").unwrap_err();
        assert!(matches!(err, NoteVaultError::InvalidFrontMatter { .. }));
    }

    #[test]
    fn test_set_key_keeps_nested_values() {
        let content = "---\nauthor:\n  name: John\n---\nbody";
        let updated = set_key(content, "status", "done").unwrap();
        assert_eq!(updated, "---\nauthor:\n  name: John\nstatus: done\n---\nbody");
    }

    #[test]
    fn test_delete_key() {
        let updated = delete_key(NOTE, "tags").unwrap();
        let doc = Document::parse(&updated).unwrap();
        assert!(doc.get("tags").is_none());
        assert_eq!(doc.get("title").unwrap().as_str(), Some("Test Note"));
    }

    #[test]
    fn test_delete_last_key_strips_block() {
        let updated = delete_key("---\ntitle: x\n---\nbody", "title").unwrap();
        assert_eq!(updated, "body");
        assert!(!has_front_matter(&updated));
    }

    #[test]
    fn test_delete_absent_key_is_noop() {
        let updated = delete_key(NOTE, "missing").unwrap();
        assert_eq!(Document::parse(&updated).unwrap(), Document::parse(NOTE).unwrap());
    }

    #[test]
    fn test_delete_key_without_front_matter() {
        let err = delete_key("plain body", "title").unwrap_err();
        assert!(matches!(err, NoteVaultError::NoFrontMatter));
    }
}
