//! Defines the `Config` struct and related types for a file-set copy.
//!
//! A `Config` is an immutable snapshot of one run: which files to copy and
//! where ([`FileSetConfig`]), and how to filter them ([`FilteringConfig`]).
//! Build one with [`ConfigBuilder`], either programmatically or from the CLI.

use crate::interpolation::Properties;
use glob::Pattern;
use std::path::PathBuf;

pub use builder::ConfigBuilder;
mod builder;
mod parsing;

/// Project-level information exposed to filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectContext {
    /// Exposed as `project.groupId`.
    pub group_id: Option<String>,
    /// Exposed as `project.artifactId`.
    pub artifact_id: Option<String>,
    /// Exposed as `project.version`.
    pub version: Option<String>,
    /// Exposed as `project.name`.
    pub name: Option<String>,
    /// Project root; relative filter paths are resolved against it. Exposed as `project.basedir`.
    pub basedir: Option<PathBuf>,
    /// Project properties.
    pub properties: Properties,
    /// The project's own filter files, only used when
    /// [`FilteringConfig::include_project_build_filters`] is set.
    pub build_filters: Vec<PathBuf>,
}

/// Settings of the token-substitution step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteringConfig {
    /// Project context: coordinates, properties, build filters.
    pub project: ProjectContext,
    /// Filter files (Java properties) contributing substitution values.
    pub filters: Vec<PathBuf>,
    /// Encoding label of filtered files. `None` falls back to UTF-8 with a warning.
    pub encoding: Option<String>,
    /// String that, placed before an expression, keeps it from being substituted.
    pub escape_string: Option<String>,
    /// Delimiter specs such as `${*}` or `@`. Empty means both of those.
    pub delimiters: Vec<String>,
    /// Also load the project's build filter files.
    pub include_project_build_filters: bool,
    /// Values with the highest precedence.
    pub additional_properties: Properties,
    /// Double backslashes of substituted values that look like Windows paths.
    pub escape_windows_paths: bool,
}

impl Default for FilteringConfig {
    fn default() -> Self {
        Self {
            project: ProjectContext::default(),
            filters: Vec::new(),
            encoding: None,
            escape_string: None,
            delimiters: Vec::new(),
            include_project_build_filters: false,
            additional_properties: Properties::new(),
            escape_windows_paths: true,
        }
    }
}

/// Which files to copy, where, and which transforms the file set asks for.
#[derive(Debug, Clone)]
pub struct FileSetConfig {
    /// Root directory of the file set.
    pub source: PathBuf,
    /// Directory the file set is copied into.
    pub output: PathBuf,
    /// Only names matching one of these globs are copied. Empty means all.
    pub includes: Vec<Pattern>,
    /// Names matching one of these globs are skipped. Takes precedence over `includes`.
    pub excludes: Vec<Pattern>,
    /// Run file content through the substitution engine.
    pub filtered: bool,
    /// Line-ending policy name; `None` keeps line endings.
    pub line_ending: Option<String>,
    /// Extensions (without the dot) of files copied unchanged.
    pub non_filtered_extensions: Vec<String>,
}

/// The complete configuration of one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Configuration of the copied file set.
    pub file_set: FileSetConfig,
    /// Configuration of the filtering step.
    pub filtering: FilteringConfig,
}

impl Config {
    /// Creates a default `Config` for testing purposes.
    ///
    /// This function is hidden from public documentation and is intended for
    /// use in tests and doc tests only.
    #[doc(hidden)]
    pub fn new_for_test() -> Self {
        Self {
            file_set: FileSetConfig {
                source: PathBuf::from("."),
                output: PathBuf::from("target/assembly"),
                includes: Vec::new(),
                excludes: Vec::new(),
                filtered: false,
                line_ending: None,
                non_filtered_extensions: Vec::new(),
            },
            filtering: FilteringConfig::default(),
        }
    }
}
