//! `assembly_filter` is a library and command-line tool for copying a file set
//! into an assembly directory while transforming text on the way.
//!
//! Two transforms can be applied to each file:
//! 1.  **Filtering**: expressions such as `${project.version}` or `@version@`
//!     are replaced by property values. Content is decoded with the configured
//!     encoding first; `.properties` files are always treated as ISO-8859-1.
//! 2.  **Line-ending normalization**: terminators are rewritten to LF or CRLF.
//!     Archives (`.zip`, `.jar`) are refused instead of being corrupted.
//!
//! Files whose extension is listed as non-filtered are always copied byte for
//! byte. When neither transform is requested, no transformer is built at all.
//!
//! # Example: Library Usage
//!
//! ```
//! use assembly_filter::{run, CancellationToken, ConfigBuilder};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! # fn main() -> anyhow::Result<()> {
//! let source = tempdir()?;
//! let output = tempdir()?;
//! fs::write(source.path().join("README.txt"), "Version ${version}\r\n")?;
//!
//! let config = ConfigBuilder::new()
//!     .source(source.path().to_str().unwrap())
//!     .output(output.path().to_str().unwrap())
//!     .filtered(true)
//!     .line_ending("unix")
//!     .encoding("UTF-8")
//!     .property("version", "2.1.0")
//!     .build()?;
//!
//! let summary = run(&config, &CancellationToken::new())?;
//! assert_eq!(summary.transformed, 1);
//!
//! let copied = fs::read_to_string(output.path().join("README.txt"))?;
//! assert_eq!(copied, "Version 2.1.0\n");
//! # Ok(())
//! # }
//! ```
//!
//! The per-file transform can also be used on its own, see
//! [`format::file_set_transformer`].

pub mod cancellation;
pub mod cli;
pub mod config;
pub mod constants;
pub mod copy;
pub mod core_types;
pub mod discovery;
pub mod errors;
pub mod format;
pub mod interpolation;
pub mod prelude;
pub mod signal;

// Re-export key public types for easier use as a library
pub use cancellation::CancellationToken;
pub use config::{Config, ConfigBuilder};
pub use core_types::{CopySummary, FileResource};
pub use format::{file_set_transformer, FileSetTransformer};
pub use interpolation::{PropertyInterpolator, ReaderFilter};

use crate::errors::Result;
use std::sync::Arc;

/// Copies the configured file set with the default substitution engine.
///
/// This is the entry point used by the command-line tool. To plug in another
/// engine, call [`copy::copy_file_set`] directly.
///
/// # Errors
/// Returns `Err(Error::NoFilesFound)` if the file set is empty and
/// `Err(Error::Interrupted)` if `token` is cancelled. Transform and I/O
/// errors are propagated.
pub fn run(config: &Config, token: &CancellationToken) -> Result<CopySummary> {
    copy::copy_file_set(config, Arc::new(PropertyInterpolator), token)
}
