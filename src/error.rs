//! Error types for the notevault library
//!
//! Every engine-level failure is surfaced through [`NoteVaultError`]. Variants map
//! one-to-one onto the failure kinds callers are expected to distinguish: path
//! traversal, unreadable vaults, broken front matter, ambiguous edits, picker
//! outcomes and configuration store failures.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum NoteVaultError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Regular expression errors
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// A relative path tried to leave the vault root
    #[error("path escapes the vault root: {path}")]
    PathTraversal { path: String },

    /// Listing target is missing or is a file
    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// The vault (or a directory inside it) could not be read
    #[error("failed to read vault: {reason}")]
    VaultRead { reason: String },

    /// A glob pattern could not be compiled
    #[error("invalid glob pattern {pattern}: {reason}")]
    InvalidGlob { pattern: String, reason: String },

    /// Front matter block is present but is not a valid YAML mapping
    #[error("frontmatter contains invalid YAML: {reason}")]
    InvalidFrontMatter { reason: String },

    /// Operation needs a front matter block and the note has none
    #[error("note does not contain frontmatter")]
    NoFrontMatter,

    /// A metadata filter string was not of the form key=value
    #[error("invalid filter format: {filter} ({reason})")]
    InvalidFilter { filter: String, reason: String },

    #[error("string not found in note: {needle:?}")]
    StringNotFound { needle: String },

    #[error(
        "string appears {count} times in note. Use --all flag to replace all occurrences or make the old string more specific"
    )]
    AmbiguousMatch { count: usize },

    #[error("old string and new string must be different")]
    IdenticalStrings,

    #[error("old string cannot be empty")]
    EmptyOldString,

    /// Note file does not exist inside the vault
    #[error("note does not exist: {path}")]
    NoteNotFound { path: String },

    /// Today's daily note was referenced through `@daily` but is not on disk
    #[error("note does not exist: {path}\nYou can create today's daily note with: notevault create \"@daily\"")]
    DailyNoteNotFound { path: String },

    #[error("no notes found matching the criteria")]
    NoNotesFound,

    /// Vault name is not registered with the companion application
    #[error("vault not found: {name}")]
    VaultNotFound { name: String },

    #[error("no default vault set; run `notevault set-default <name>` or pass --vault")]
    DefaultVaultNotSet,

    #[error("no content provided; pass it as an argument or pipe it through stdin")]
    MissingContent,

    /// Picker finished without a usable choice
    #[error("no item selected")]
    NoSelection,

    /// Picker was aborted by the user
    #[error("selection cancelled")]
    Cancelled,

    #[error("fuzzy finder unavailable: {reason}")]
    PickerUnavailable { reason: String },

    /// An external program (editor, URI handler) failed
    #[error("failed to launch {program}: {reason}")]
    Launch { program: String, reason: String },

    #[error("failed to read config {path}: {reason}")]
    ConfigRead { path: PathBuf, reason: String },

    #[error("failed to parse config {path}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    #[error("failed to write config {path}: {reason}")]
    ConfigWrite { path: PathBuf, reason: String },

    #[error("daily note pattern is not configured; run `notevault set-daily-pattern <pattern>`")]
    DailyPatternNotConfigured,
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, NoteVaultError>;

impl NoteVaultError {
    /// Create a new path traversal error
    pub fn path_traversal(path: impl Into<String>) -> Self {
        Self::PathTraversal { path: path.into() }
    }

    /// Create a new not-a-directory error
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory { path: path.into() }
    }

    /// Create a new vault read error
    pub fn vault_read(reason: impl Into<String>) -> Self {
        Self::VaultRead {
            reason: reason.into(),
        }
    }

    pub fn invalid_glob(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidGlob {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Create a new invalid front matter error
    pub fn invalid_front_matter(reason: impl Into<String>) -> Self {
        Self::InvalidFrontMatter {
            reason: reason.into(),
        }
    }

    pub fn invalid_filter(filter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFilter {
            filter: filter.into(),
            reason: reason.into(),
        }
    }

    pub fn string_not_found(needle: impl Into<String>) -> Self {
        Self::StringNotFound {
            needle: needle.into(),
        }
    }

    pub fn note_not_found(path: impl Into<String>) -> Self {
        Self::NoteNotFound { path: path.into() }
    }

    pub fn vault_not_found(name: impl Into<String>) -> Self {
        Self::VaultNotFound { name: name.into() }
    }

    pub fn picker_unavailable(reason: impl Into<String>) -> Self {
        Self::PickerUnavailable {
            reason: reason.into(),
        }
    }

    /// Create a new launch error for an external program
    pub fn launch(program: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Launch {
            program: program.into(),
            reason: reason.into(),
        }
    }

    pub fn config_read(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ConfigRead {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn config_parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ConfigParse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn config_write(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ConfigWrite {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error was caused by what the user asked for rather than by
    /// the environment (disk, external programs, config files)
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::PathTraversal { .. }
                | Self::InvalidGlob { .. }
                | Self::InvalidFilter { .. }
                | Self::StringNotFound { .. }
                | Self::AmbiguousMatch { .. }
                | Self::IdenticalStrings
                | Self::EmptyOldString
                | Self::NoteNotFound { .. }
                | Self::DailyNoteNotFound { .. }
                | Self::NoNotesFound
                | Self::MissingContent
                | Self::VaultNotFound { .. }
                | Self::DefaultVaultNotSet
                | Self::DailyPatternNotConfigured
                | Self::NoSelection
                | Self::Cancelled
        )
    }

    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Io(_) | Self::ConfigWrite { .. } | Self::VaultRead { .. } => {
                ErrorSeverity::Critical
            }
            Self::PathTraversal { .. }
            | Self::InvalidFrontMatter { .. }
            | Self::Yaml(_)
            | Self::ConfigRead { .. }
            | Self::ConfigParse { .. } => ErrorSeverity::High,
            Self::NoSelection | Self::Cancelled | Self::NoNotesFound => ErrorSeverity::Low,
            _ => ErrorSeverity::Medium,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code used by the binary for this severity
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = NoteVaultError::path_traversal("../secret.md");
        assert!(matches!(err, NoteVaultError::PathTraversal { .. }));
        assert!(err.is_user_error());
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_error_severity_ordering() {
        assert!(ErrorSeverity::Critical > ErrorSeverity::High);
        assert!(ErrorSeverity::High > ErrorSeverity::Medium);
        assert!(ErrorSeverity::Medium > ErrorSeverity::Low);
        assert!(ErrorSeverity::Critical.exit_code() > ErrorSeverity::Low.exit_code());
    }

    #[test]
    fn test_ambiguous_match_message() {
        let err = NoteVaultError::AmbiguousMatch { count: 2 };
        let message = err.to_string();
        assert!(message.contains("appears 2 times"));
        assert!(message.contains("--all"));
    }

    #[test]
    fn test_environment_errors_are_not_user_errors() {
        let err = NoteVaultError::config_write("/tmp/preferences.json", "read-only");
        assert!(!err.is_user_error());
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
