//! The `assembly_filter` prelude for convenient library usage.
//!
//! # Example
//!
//! ```
//! use assembly_filter::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let config = FilteringConfig::default();
//! let transformer = file_set_transformer(
//!     &config,
//!     std::sync::Arc::new(PropertyInterpolator),
//!     false,
//!     &[],
//!     Some("crlf"),
//! )?
//! .expect("line endings requested");
//!
//! assert_eq!(transformer.line_ending(), LineEnding::Crlf);
//! # Ok(())
//! # }
//! ```

pub use crate::cancellation::CancellationToken;
pub use crate::config::{Config, ConfigBuilder, FileSetConfig, FilteringConfig, ProjectContext};
pub use crate::copy::copy_file_set;
pub use crate::core_types::{CopySummary, FileResource};
pub use crate::discovery::discover_files;
pub use crate::errors::{Error, Result};
pub use crate::format::{
    file_set_transformer, has_non_filtered_extension, is_binary_container, is_property_file,
    FileSetTransformer, LineEnding, TextEncoding,
};
pub use crate::interpolation::{
    DelimiterSet, FilterContext, FilterError, FilterRequest, Properties, PropertyInterpolator,
    ReaderFilter,
};
pub use crate::run;
