//! Metadata filters over front matter
//!
//! A filter set is a conjunction of `key=value` predicates. There is no OR,
//! negation or range support.

use crate::core::document::FrontMatterBlock;
use crate::error::{NoteVaultError, Result};
use std::collections::BTreeMap;

/// A set of `key -> literal` predicates that must all hold
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataFilter {
    predicates: BTreeMap<String, String>,
}

impl MetadataFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `key=value` strings as typed on the command line.
    ///
    /// Splits on the first `=` only, trims both halves, and rejects strings
    /// without `=` or with an empty key. A repeated key keeps the last value.
    pub fn parse<S: AsRef<str>>(filters: &[S]) -> Result<Self> {
        let mut predicates = BTreeMap::new();
        for raw in filters {
            let raw = raw.as_ref();
            let (key, value) = raw
                .split_once('=')
                .ok_or_else(|| NoteVaultError::invalid_filter(raw, "expected key=value"))?;

            let key = key.trim();
            if key.is_empty() {
                return Err(NoteVaultError::invalid_filter(raw, "filter key cannot be empty"));
            }
            predicates.insert(key.to_string(), value.trim().to_string());
        }
        Ok(Self { predicates })
    }

    /// Add a single predicate
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.predicates.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.predicates.get(key).map(String::as_str)
    }

    /// Check every predicate against the block; a missing key fails the whole set
    pub fn matches(&self, front_matter: &FrontMatterBlock) -> bool {
        self.predicates.iter().all(|(key, literal)| {
            front_matter
                .get(key)
                .is_some_and(|value| value.matches_literal(literal))
        })
    }
}
