//! Error types for labdata-core

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for labdata operations
pub type Result<T> = std::result::Result<T, LabDataError>;

/// Main error type for labdata operations
///
/// Data-quality findings (unresolved authors, unknown project ids, ambiguous
/// aliases) are never errors; they are reported through
/// [`Diagnostics`](crate::assembler::Diagnostics).
#[derive(Error, Debug)]
pub enum LabDataError {
    /// Reading or writing a file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configured BibTeX source could not be parsed
    #[error("BibTeX syntax error in {path} at line {line}: {message}")]
    BibSyntax {
        path: PathBuf,
        line: u32,
        message: String,
    },

    /// Configuration file is missing
    #[error("Configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    /// Configuration file could not be parsed
    #[error("Configuration parse error in {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Configuration parsed but holds an unusable value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A people or projects roster could not be parsed
    #[error("Roster parse error in {path}: {message}")]
    RosterParse { path: PathBuf, message: String },

    /// Export serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),
}

/// Format-specific serialization failures
#[derive(Error, Debug)]
pub enum SerializationError {
    #[error("YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl LabDataError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the operator must fix a path or an input file
    ///
    /// Everything except serialization failures qualifies: a missing or
    /// malformed configuration, source or roster file.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::Serialization(_))
    }
}
