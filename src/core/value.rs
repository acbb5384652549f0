//! Core value types for front matter handling
//!
//! Front matter is loosely typed YAML. Instead of carrying a general document tree
//! around, values are narrowed to the shapes that filtering and editing care
//! about: a scalar (string, boolean, number) or a list of scalars. Anything else
//! (null, nested mappings, nested lists) is kept verbatim as [`Scalar::Other`] so
//! that rewriting a block never drops data it did not touch.

use serde_yaml::{Mapping, Number, Value};
use std::fmt;

/// A single front matter scalar
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Bool(bool),
    Number(Number),
    /// Any YAML node that is not a plain scalar, preserved as-is
    Other(Value),
}

/// A front matter value: one scalar or a list of them
#[derive(Debug, Clone, PartialEq)]
pub enum FrontMatterValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

impl Scalar {
    fn from_yaml(value: Value) -> Self {
        match value {
            Value::String(s) => Self::String(s),
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            other => Self::Other(other),
        }
    }

    fn into_yaml(self) -> Value {
        match self {
            Self::String(s) => Value::String(s),
            Self::Bool(b) => Value::Bool(b),
            Self::Number(n) => Value::Number(n),
            Self::Other(v) => v,
        }
    }

    fn to_yaml(&self) -> Value {
        self.clone().into_yaml()
    }

    /// Check this scalar against a literal filter value.
    ///
    /// Strings need exact equality, booleans compare against `literal == "true"`,
    /// numbers compare the trimmed literal against their canonical rendering and
    /// everything else against its default rendering.
    pub fn matches_literal(&self, literal: &str) -> bool {
        match self {
            Self::String(s) => s == literal,
            Self::Bool(b) => *b == (literal == "true"),
            Self::Number(n) => literal.trim() == canonical_number(n),
            Self::Other(_) => self.to_string() == literal,
        }
    }
}

/// Canonical string form of a YAML number: integers in decimal, floats in their
/// shortest round-tripping form (`2.0` renders as `2`).
pub fn canonical_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{}", s),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", canonical_number(n)),
            Self::Other(Value::Null) => write!(f, "null"),
            Self::Other(v) => {
                let rendered = serde_yaml::to_string(v).unwrap_or_else(|_| "<invalid>".to_string());
                write!(f, "{}", rendered.trim())
            }
        }
    }
}

impl FrontMatterValue {
    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Self::Scalar(Scalar::String(s.into()))
    }

    /// Create a boolean value
    pub fn bool(b: bool) -> Self {
        Self::Scalar(Scalar::Bool(b))
    }

    /// Create an integer value
    pub fn int(i: i64) -> Self {
        Self::Scalar(Scalar::Number(i.into()))
    }

    /// Create a list of strings
    pub fn string_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(|s| Scalar::String(s.into())).collect())
    }

    /// Narrow a YAML node into a front matter value
    pub fn from_yaml(value: Value) -> Self {
        match value {
            Value::Sequence(items) => {
                Self::List(items.into_iter().map(Scalar::from_yaml).collect())
            }
            other => Self::Scalar(Scalar::from_yaml(other)),
        }
    }

    /// Convert back into a YAML node for serialization
    pub fn to_yaml(&self) -> Value {
        match self {
            Self::Scalar(s) => s.to_yaml(),
            Self::List(items) => Value::Sequence(items.iter().map(Scalar::to_yaml).collect()),
        }
    }

    /// Interpret a literal typed on the command line.
    ///
    /// `true`/`false` become booleans, `[a, b]` becomes a list of trimmed strings
    /// (`[]` is an empty list), anything else is stored as a plain string.
    pub fn parse_literal(literal: &str) -> Self {
        match literal {
            "true" => return Self::bool(true),
            "false" => return Self::bool(false),
            _ => {}
        }

        if let Some(inner) = literal
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            if inner.is_empty() {
                return Self::List(Vec::new());
            }
            return Self::string_list(inner.split(',').map(str::trim));
        }

        Self::string(literal)
    }

    /// Filter semantics: lists match when any element matches, scalars directly
    pub fn matches_literal(&self, literal: &str) -> bool {
        match self {
            Self::Scalar(s) => s.matches_literal(literal),
            Self::List(items) => items.iter().any(|item| item.matches_literal(literal)),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Scalar(Scalar::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Scalar]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Render a YAML mapping key as a string; complex keys are rejected
pub(crate) fn key_to_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(canonical_number(n)),
        _ => None,
    }
}

/// Build a YAML mapping from ordered key/value pairs
pub(crate) fn to_mapping<'a, I>(entries: I) -> Mapping
where
    I: IntoIterator<Item = (&'a String, &'a FrontMatterValue)>,
{
    entries
        .into_iter()
        .map(|(k, v)| (Value::String(k.clone()), v.to_yaml()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal_booleans() {
        assert_eq!(FrontMatterValue::parse_literal("true"), FrontMatterValue::bool(true));
        assert_eq!(FrontMatterValue::parse_literal("false"), FrontMatterValue::bool(false));
        // Only the exact lowercase literals are booleans
        assert_eq!(FrontMatterValue::parse_literal("True"), FrontMatterValue::string("True"));
    }

    #[test]
    fn test_parse_literal_lists() {
        assert_eq!(
            FrontMatterValue::parse_literal("[a, b ,c]"),
            FrontMatterValue::string_list(["a", "b", "c"])
        );
        assert_eq!(FrontMatterValue::parse_literal("[]"), FrontMatterValue::List(Vec::new()));
        assert_eq!(FrontMatterValue::parse_literal("[solo]"), FrontMatterValue::string_list(["solo"]));
    }

    #[test]
    fn test_parse_literal_plain_strings() {
        assert_eq!(FrontMatterValue::parse_literal("John"), FrontMatterValue::string("John"));
        assert_eq!(FrontMatterValue::parse_literal("42"), FrontMatterValue::string("42"));
        assert_eq!(FrontMatterValue::parse_literal("[open"), FrontMatterValue::string("[open"));
    }

    #[test]
    fn test_from_yaml_narrows_shapes() {
        let value: Value = serde_yaml::from_str("[rust, 3, true]").unwrap();
        let parsed = FrontMatterValue::from_yaml(value);
        let items = parsed.as_list().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], Scalar::String("rust".to_string()));
        assert!(matches!(items[1], Scalar::Number(_)));
        assert_eq!(items[2], Scalar::Bool(true));

        let nested: Value = serde_yaml::from_str("name: John").unwrap();
        assert!(matches!(
            FrontMatterValue::from_yaml(nested),
            FrontMatterValue::Scalar(Scalar::Other(Value::Mapping(_)))
        ));
    }

    #[test]
    fn test_scalar_matching_rules() {
        assert!(Scalar::String("active".into()).matches_literal("active"));
        assert!(!Scalar::String("active".into()).matches_literal("Active"));

        assert!(Scalar::Bool(true).matches_literal("true"));
        assert!(Scalar::Bool(false).matches_literal("no"));
        assert!(!Scalar::Bool(true).matches_literal("yes"));

        assert!(Scalar::Number(42.into()).matches_literal("42"));
        assert!(Scalar::Number(42.into()).matches_literal(" 42 "));
        assert!(Scalar::Number(Number::from(3.5)).matches_literal("3.5"));
        assert!(Scalar::Number(Number::from(2.0)).matches_literal("2"));

        assert!(Scalar::Other(Value::Null).matches_literal("null"));
    }

    #[test]
    fn test_list_matching() {
        let tags = FrontMatterValue::string_list(["work", "urgent"]);
        assert!(tags.matches_literal("work"));
        assert!(!tags.matches_literal("home"));
        assert!(!FrontMatterValue::List(Vec::new()).matches_literal(""));
    }

    #[test]
    fn test_yaml_round_trip_preserves_nested_values() {
        let source: Value = serde_yaml::from_str("{name: John, email: j@example.com}").unwrap();
        let value = FrontMatterValue::from_yaml(source.clone());
        assert_eq!(value.to_yaml(), source);
    }
}
