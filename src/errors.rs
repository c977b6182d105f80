//! Defines library-level error types.
//!
//! The `Error` enum categorizes the failures a file-set copy can hit, offering
//! more context than generic I/O or `anyhow` errors. Substitution-engine
//! failures keep their own type, [`FilterError`], and are wrapped here together
//! with the name of the file being filtered.

use crate::interpolation::FilterError;
use thiserror::Error;

/// Errors produced by the transform factory, the per-file transform and the copy loop.
#[derive(Error, Debug)]
pub enum Error {
    // --- I/O Errors ---
    /// Error occurring during file or directory access (read, write, metadata).
    #[error("I/O error accessing path '{path}': {source}")]
    Io {
        /// The path that caused the I/O error.
        path: String,
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },

    // --- Configuration Errors ---
    /// Invalid configuration settings or combinations.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The requested line-ending policy name is not known.
    #[error("Illegal lineEnding specified: '{0}'")]
    IllegalLineEnding(String),

    /// The configured encoding label is unknown or cannot be used for writing.
    #[error("Unsupported encoding: '{0}'")]
    UnsupportedEncoding(String),

    // --- Per-file transform errors ---
    /// The substitution engine failed while filtering a file.
    #[error("Error filtering file '{name}': {source}")]
    Filtering {
        /// Name of the resource being filtered.
        name: String,
        /// The engine failure.
        #[source]
        source: FilterError,
    },

    /// Line-ending rewriting was requested for an archive file.
    #[error(
        "Cannot transform line endings on this kind of file: {name}\n\
         Doing so is more or less guaranteed to destroy the file, and it indicates \
         a problem with your file set configuration.\n\
         Exclude the archive from the file set or use the 'keep' line-ending policy."
    )]
    BinaryContainer {
        /// Name of the offending resource.
        name: String,
    },

    // --- Signal Handling ---
    /// The operation was cancelled by the user (e.g., Ctrl+C).
    #[error("Operation cancelled by user (Ctrl+C)")]
    Interrupted,

    /// No files in the source directory matched the file set.
    #[error("No files found matching the specified file set.")]
    NoFilesFound,
}

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Helper function to create an `Error::Io` with path context.
///
/// # Arguments
/// * `source` - The original `std::io::Error`.
/// * `path` - The path associated with the error, convertible to `AsRef<std::path::Path>`.
pub fn io_error_with_path<P: AsRef<std::path::Path>>(source: std::io::Error, path: P) -> Error {
    Error::Io {
        path: path.as_ref().display().to_string(),
        source,
    }
}
