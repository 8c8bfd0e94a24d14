//! # Error Module
//!
//! Errors raised by the generation engine. Application glue (CLI, config
//! loading) wraps these in `anyhow` with extra context.
//!
//! An artifact that already exists on disk is *not* an error: it is reported
//! as [`crate::generator::EmitStatus::AlreadyExists`] so hand-edited files are
//! preserved. Likewise a column name that matches no known convention is not an
//! error; the classifier falls back to a plain field.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::model::MediaSubtype;

/// Error raised while preparing or materialising a model's artifacts
#[derive(Debug)]
pub enum GenerateError {
    /// The backing table for the model does not exist in the schema source
    ///
    /// Raised before generation starts; nothing has been written.
    SchemaNotFound {
        /// Table name that was looked up (e.g. `products`)
        table: String,
    },
    /// The model name is not a PascalCase identifier
    InvalidModelName {
        /// The rejected name
        name: String,
    },
    /// A directory for an artifact could not be created
    DirectoryCreateFailure {
        /// Directory that failed
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
    /// An artifact could not be written (or the route file appended to)
    FileWriteFailure {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
    /// A template failed to render
    Render {
        /// Artifact being rendered (e.g. `controller`)
        artifact: &'static str,
        /// Renderer message
        message: String,
    },
    /// The configuration file could not be parsed or is inconsistent
    Config {
        /// Configuration file
        path: PathBuf,
        /// Parser or validation message
        message: String,
    },
    /// Two media subtypes share a suffix, or one suffix ends with another
    OverlappingMediaSuffix {
        /// First suffix
        first: String,
        /// Second suffix
        second: String,
    },
    /// A media rule declares an empty suffix, which would match every column
    EmptyMediaSuffix {
        /// Subtype carrying the empty suffix
        subtype: MediaSubtype,
    },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::SchemaNotFound { table } => {
                write!(f, "Table {table} does not exist.")
            }
            GenerateError::InvalidModelName { name } => {
                write!(
                    f,
                    "Invalid model name '{name}'. Expected a PascalCase singular identifier (e.g. Product, OrderItem)"
                )
            }
            GenerateError::DirectoryCreateFailure { path, source } => {
                write!(f, "Failed to create directory {}: {source}", path.display())
            }
            GenerateError::FileWriteFailure { path, source } => {
                write!(f, "Failed to write {}: {source}", path.display())
            }
            GenerateError::Render { artifact, message } => {
                write!(f, "Failed to render {artifact}: {message}")
            }
            GenerateError::Config { path, message } => {
                write!(f, "Invalid configuration {}: {message}", path.display())
            }
            GenerateError::OverlappingMediaSuffix { first, second } => {
                write!(
                    f,
                    "Media suffixes '{first}' and '{second}' overlap; a column could match both subtypes"
                )
            }
            GenerateError::EmptyMediaSuffix { subtype } => {
                write!(f, "Media rule for {subtype} declares an empty suffix")
            }
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::DirectoryCreateFailure { source, .. }
            | GenerateError::FileWriteFailure { source, .. } => Some(source),
            _ => None,
        }
    }
}
