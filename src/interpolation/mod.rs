//! Token substitution: the filter capability consumed by the per-file transform.
//!
//! The transform never depends on a concrete substitution engine. It talks to a
//! [`ReaderFilter`], handing it the decoded text of one file together with a
//! [`FilterRequest`] that describes the delimiters, the escape string and the
//! property values to substitute. [`PropertyInterpolator`] is the engine used by
//! the CLI; library users can plug in their own.

use crate::config::FilteringConfig;
use crate::constants::ENV_PROPERTY_PREFIX;
use log::debug;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod delimiters;
pub mod interpolator;
pub mod properties;

pub use delimiters::{Delimiter, DelimiterSet};
pub use interpolator::PropertyInterpolator;
pub use properties::{load_properties_file, parse_properties};

/// Key/value pairs available to substitution, ordered by key.
pub type Properties = BTreeMap<String, String>;

/// A text substitution engine.
///
/// Implementations receive the full decoded text of a single file and return
/// the filtered text. They must be safe to call from several threads at once.
pub trait ReaderFilter: Send + Sync {
    /// Filters `source` according to `request`.
    fn filter(&self, source: &str, request: &FilterRequest<'_>) -> Result<String, FilterError>;
    /// Returns a descriptive name for the engine.
    fn name(&self) -> &'static str;
}

impl fmt::Debug for dyn ReaderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReaderFilter").field(&self.name()).finish()
    }
}

/// Everything an engine needs to filter one file.
#[derive(Debug, Clone, Copy)]
pub struct FilterRequest<'a> {
    /// Resolved property values.
    pub context: &'a FilterContext,
    /// Expression delimiters, in priority order.
    pub delimiters: &'a DelimiterSet,
    /// When set, an expression preceded by this string is emitted literally.
    pub escape_string: Option<&'a str>,
    /// The file being filtered is a `.properties` file.
    pub properties_file: bool,
    /// Double the backslashes of substituted values that look like Windows paths.
    pub escape_windows_paths: bool,
}

/// Failures raised by a substitution engine.
#[derive(Error, Debug)]
pub enum FilterError {
    /// A property value refers back to itself, directly or through other keys.
    #[error("Expression cycle detected while resolving '{expression}'")]
    Cycle {
        /// The expression that was already being resolved.
        expression: String,
    },

    /// Property values nest deeper than the engine allows.
    #[error("Expression '{expression}' nests too deeply")]
    TooDeep {
        /// The expression at which resolution stopped.
        expression: String,
    },

    /// A filter file could not be read.
    #[error("Cannot read filter file '{path}': {source}")]
    Io {
        /// Path of the filter file.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Any other engine-specific failure.
    #[error("{0}")]
    Engine(String),
}

/// The immutable set of property values used while filtering a file set.
///
/// Built once per transformer; lookups never touch the filesystem or the
/// process environment afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterContext {
    properties: Properties,
}

impl FilterContext {
    /// Creates a context from an explicit property map.
    pub fn new(properties: Properties) -> Self {
        Self { properties }
    }

    /// Assembles the property values for `config`.
    ///
    /// Sources are merged from lowest to highest precedence: environment
    /// variables (as `env.NAME`), project coordinates (`project.*`), filter
    /// files, project build filter files (only when enabled), project
    /// properties and finally the additional properties.
    ///
    /// # Errors
    /// Returns [`FilterError::Io`] if a filter file cannot be read.
    pub fn from_config(config: &FilteringConfig) -> Result<Self, FilterError> {
        let mut properties = Properties::new();

        // Variables that are not valid Unicode cannot be substituted and are skipped.
        for (key, value) in std::env::vars_os() {
            if let (Ok(key), Ok(value)) = (key.into_string(), value.into_string()) {
                properties.insert(format!("{}{}", ENV_PROPERTY_PREFIX, key), value);
            }
        }

        let project = &config.project;
        let coordinates = [
            ("project.groupId", project.group_id.as_deref()),
            ("project.artifactId", project.artifact_id.as_deref()),
            ("project.version", project.version.as_deref()),
            ("project.name", project.name.as_deref()),
        ];
        for (key, value) in coordinates {
            if let Some(value) = value {
                properties.insert(key.to_string(), value.to_string());
            }
        }
        if let Some(basedir) = &project.basedir {
            properties.insert("project.basedir".to_string(), basedir.display().to_string());
        }

        for filter in &config.filters {
            let path = resolve_against(project.basedir.as_deref(), filter);
            debug!("Loading filter file {}", path.display());
            properties.extend(load_properties_file(&path)?);
        }

        if config.include_project_build_filters {
            for filter in project
                .build_filters
                .iter()
                .filter(|f| !config.filters.contains(f))
            {
                let path = resolve_against(project.basedir.as_deref(), filter);
                debug!("Loading project build filter {}", path.display());
                properties.extend(load_properties_file(&path)?);
            }
        }

        properties.extend(
            project
                .properties
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        properties.extend(
            config
                .additional_properties
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        Ok(Self { properties })
    }

    /// Looks up the raw (not yet interpolated) value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Returns all property values.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }
}

fn resolve_against(basedir: Option<&Path>, path: &Path) -> PathBuf {
    match basedir {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}
