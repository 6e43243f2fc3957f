//! Error types for configuration loading, fix construction and file linting.

use std::ops::Range;
use std::path::PathBuf;

use thiserror::Error;

/// Errors building or applying a [`Patch`](crate::fix::Patch).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixError {
    #[error("a patch needs at least one edit")]
    Empty,

    #[error("edits {first:?} and {second:?} overlap")]
    Overlap {
        first: Range<usize>,
        second: Range<usize>,
    },

    #[error("edit {range:?} is outside the {len}-byte source")]
    OutOfBounds { range: Range<usize>, len: usize },
}

/// Errors loading a lint configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read lint config: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse lint config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unknown lint rule '{0}'")]
    UnknownRule(String),

    #[error("Invalid severity '{value}' for rule '{rule}' (expected off, warn or error)")]
    InvalidSeverity { rule: String, value: String },
}

/// Errors from [`Linter::lint_file`](crate::Linter::lint_file).
#[derive(Debug, Error)]
pub enum LintError {
    #[error("Error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
