// src/config/builder.rs

use super::{
    parsing::{compile_glob_vec, normalize_extensions, parse_property_args},
    Config, FileSetConfig, FilteringConfig, ProjectContext,
};
use crate::cli::Cli;
use crate::format::{LineEnding, TextEncoding};
use crate::interpolation::{load_properties_file, DelimiterSet};
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// A builder for creating a `Config` programmatically or from CLI arguments.
///
/// # Examples
///
/// ```
/// use assembly_filter::ConfigBuilder;
/// use tempfile::tempdir;
///
/// let source = tempdir().unwrap();
/// let output = tempdir().unwrap();
///
/// let config = ConfigBuilder::new()
///     .source(source.path().to_str().unwrap())
///     .output(output.path().to_str().unwrap())
///     .filtered(true)
///     .line_ending("unix")
///     .property("version", "1.0.0")
///     .build()
///     .unwrap();
///
/// assert!(config.file_set.filtered);
/// assert_eq!(
///     config.filtering.additional_properties.get("version").map(String::as_str),
///     Some("1.0.0")
/// );
/// ```
#[derive(Debug, Default, Clone)]
pub struct ConfigBuilder {
    source: Option<String>,
    output: Option<String>,
    includes: Vec<String>,
    excludes: Vec<String>,
    filtered: bool,
    line_ending: Option<String>,
    non_filtered_extensions: Vec<String>,
    encoding: Option<String>,
    escape_string: Option<String>,
    delimiters: Vec<String>,
    filters: Vec<String>,
    build_filters: Vec<String>,
    include_build_filters: bool,
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    name: Option<String>,
    basedir: Option<String>,
    project_properties_file: Option<String>,
    project_property_args: Vec<String>,
    property_args: Vec<String>,
    no_escape_windows_paths: bool,
}

impl ConfigBuilder {
    /// Creates a new `ConfigBuilder` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder pre-filled from parsed command-line arguments.
    pub fn from_cli(cli: Cli) -> Self {
        Self {
            source: Some(cli.source),
            output: Some(cli.output),
            includes: cli.includes.unwrap_or_default(),
            excludes: cli.excludes.unwrap_or_default(),
            filtered: cli.filtered,
            line_ending: cli.line_ending,
            non_filtered_extensions: cli.non_filtered_extensions.unwrap_or_default(),
            encoding: cli.encoding,
            escape_string: cli.escape_string,
            delimiters: cli.delimiters.unwrap_or_default(),
            filters: cli.filters.unwrap_or_default(),
            build_filters: cli.build_filters.unwrap_or_default(),
            include_build_filters: cli.include_build_filters,
            group_id: cli.group_id,
            artifact_id: cli.artifact_id,
            version: cli.project_version,
            name: cli.project_name,
            basedir: cli.basedir,
            project_properties_file: cli.project_properties,
            project_property_args: Vec::new(),
            property_args: cli.properties.unwrap_or_default(),
            no_escape_windows_paths: cli.no_escape_windows_paths,
        }
    }

    /// Sets the root directory of the file set. Defaults to `.`.
    pub fn source(mut self, path: impl Into<String>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Sets the directory the file set is copied into. Required.
    pub fn output(mut self, path: impl Into<String>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Only copies files whose relative name matches one of these globs.
    pub fn includes(mut self, globs: Vec<String>) -> Self {
        self.includes = globs;
        self
    }

    /// Skips files whose relative name matches one of these globs.
    pub fn excludes(mut self, globs: Vec<String>) -> Self {
        self.excludes = globs;
        self
    }

    /// Enables token filtering of file content.
    pub fn filtered(mut self, filtered: bool) -> Self {
        self.filtered = filtered;
        self
    }

    /// Sets the line-ending policy (`keep`, `unix`, `lf`, `dos`, `windows`, `crlf`, `autodetect`).
    pub fn line_ending(mut self, policy: impl Into<String>) -> Self {
        self.line_ending = Some(policy.into());
        self
    }

    /// Sets the extensions of files copied unchanged.
    pub fn non_filtered_extensions(mut self, exts: Vec<String>) -> Self {
        self.non_filtered_extensions = exts;
        self
    }

    /// Sets the encoding of filtered files.
    pub fn encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = Some(label.into());
        self
    }

    /// Sets the escape string protecting expressions from substitution.
    pub fn escape_string(mut self, escape: impl Into<String>) -> Self {
        self.escape_string = Some(escape.into());
        self
    }

    /// Sets the delimiter specs, replacing the `${*}`/`@` default.
    pub fn delimiters(mut self, specs: Vec<String>) -> Self {
        self.delimiters = specs;
        self
    }

    /// Adds a filter file.
    pub fn filter_file(mut self, path: impl Into<String>) -> Self {
        self.filters.push(path.into());
        self
    }

    /// Adds a project build filter file.
    pub fn build_filter_file(mut self, path: impl Into<String>) -> Self {
        self.build_filters.push(path.into());
        self
    }

    /// Loads project build filter files as well.
    pub fn include_build_filters(mut self, include: bool) -> Self {
        self.include_build_filters = include;
        self
    }

    /// Sets `project.groupId`.
    pub fn group_id(mut self, value: impl Into<String>) -> Self {
        self.group_id = Some(value.into());
        self
    }

    /// Sets `project.artifactId`.
    pub fn artifact_id(mut self, value: impl Into<String>) -> Self {
        self.artifact_id = Some(value.into());
        self
    }

    /// Sets `project.version`.
    pub fn project_version(mut self, value: impl Into<String>) -> Self {
        self.version = Some(value.into());
        self
    }

    /// Sets `project.name`.
    pub fn project_name(mut self, value: impl Into<String>) -> Self {
        self.name = Some(value.into());
        self
    }

    /// Sets the project base directory.
    pub fn basedir(mut self, path: impl Into<String>) -> Self {
        self.basedir = Some(path.into());
        self
    }

    /// Loads project properties from a properties file.
    pub fn project_properties_file(mut self, path: impl Into<String>) -> Self {
        self.project_properties_file = Some(path.into());
        self
    }

    /// Adds a project property; overrides the project properties file.
    pub fn project_property(mut self, key: &str, value: &str) -> Self {
        self.project_property_args.push(format!("{}={}", key, value));
        self
    }

    /// Adds an additional property, which takes precedence over every other source.
    pub fn property(mut self, key: &str, value: &str) -> Self {
        self.property_args.push(format!("{}={}", key, value));
        self
    }

    /// Disables Windows path escaping of substituted values.
    pub fn escape_windows_paths(mut self, escape: bool) -> Self {
        self.no_escape_windows_paths = !escape;
        self
    }

    /// Validates the settings and builds the final `Config`.
    ///
    /// # Errors
    /// Returns an error if the source directory cannot be resolved, the output
    /// directory is missing or equals the source, or any value (glob, property,
    /// line-ending policy, encoding, delimiter, project properties file) is invalid.
    pub fn build(self) -> Result<Config> {
        let source_str = self.source.unwrap_or_else(|| ".".to_string());
        let source = PathBuf::from(&source_str)
            .canonicalize()
            .with_context(|| format!("Failed to resolve source directory '{}'", source_str))?;
        if !source.is_dir() {
            return Err(anyhow!("Source '{}' is not a directory", source_str));
        }

        let output_str = self
            .output
            .ok_or_else(|| anyhow!("An output directory is required (--output)"))?;
        let output = PathBuf::from(&output_str);
        let output = if output.is_absolute() {
            output
        } else {
            std::env::current_dir()
                .context("Failed to determine the current directory")?
                .join(output)
        };
        if output == source || output.canonicalize().map_or(false, |o| o == source) {
            return Err(anyhow!(
                "Output directory '{}' must differ from the source directory",
                output_str
            ));
        }

        LineEnding::from_policy(self.line_ending.as_deref())?;
        if let Some(label) = &self.encoding {
            TextEncoding::for_label(label)?;
        }
        DelimiterSet::from_specs(&self.delimiters)
            .map_err(|spec| anyhow!("Invalid delimiter specification: '{}'", spec))?;

        let mut project_properties = match &self.project_properties_file {
            Some(path) => load_properties_file(Path::new(path))
                .with_context(|| format!("Failed to load project properties '{}'", path))?,
            None => Default::default(),
        };
        project_properties.extend(parse_property_args(&self.project_property_args)?);

        let file_set = FileSetConfig {
            source,
            output,
            includes: compile_glob_vec(&self.includes, "include")?,
            excludes: compile_glob_vec(&self.excludes, "exclude")?,
            filtered: self.filtered,
            line_ending: self.line_ending,
            non_filtered_extensions: normalize_extensions(&self.non_filtered_extensions),
        };

        let filtering = FilteringConfig {
            project: ProjectContext {
                group_id: self.group_id,
                artifact_id: self.artifact_id,
                version: self.version,
                name: self.name,
                basedir: self.basedir.map(PathBuf::from),
                properties: project_properties,
                build_filters: self.build_filters.into_iter().map(PathBuf::from).collect(),
            },
            filters: self.filters.into_iter().map(PathBuf::from).collect(),
            encoding: self.encoding,
            escape_string: self.escape_string,
            delimiters: self.delimiters,
            include_project_build_filters: self.include_build_filters,
            additional_properties: parse_property_args(&self.property_args)?,
            escape_windows_paths: !self.no_escape_windows_paths,
        };

        Ok(Config {
            file_set,
            filtering,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_basic_config_creation() -> Result<()> {
        let source = tempdir()?;
        let output = tempdir()?;
        let config = ConfigBuilder::new()
            .source(source.path().to_str().unwrap())
            .output(output.path().to_str().unwrap())
            .build()?;
        assert!(config.file_set.source.is_absolute());
        assert!(!config.file_set.filtered);
        assert!(config.file_set.line_ending.is_none());
        assert!(config.filtering.escape_windows_paths);
        assert!(config.filtering.delimiters.is_empty());
        Ok(())
    }

    #[test]
    fn test_from_cli() -> Result<()> {
        let source = tempdir()?;
        let output = tempdir()?;
        let cli = Cli::parse_from([
            "assembly-filter",
            source.path().to_str().unwrap(),
            "-o",
            output.path().to_str().unwrap(),
            "-F",
            "--line-ending",
            "crlf",
            "-x",
            ".png",
            "jar",
            "-D",
            "a=1",
            "--delimiter",
            "#{*}",
            "--project-version",
            "2.0",
        ]);
        let config = ConfigBuilder::from_cli(cli).build()?;
        assert!(config.file_set.filtered);
        assert_eq!(config.file_set.line_ending.as_deref(), Some("crlf"));
        assert_eq!(config.file_set.non_filtered_extensions, vec!["png", "jar"]);
        assert_eq!(
            config.filtering.additional_properties.get("a").map(String::as_str),
            Some("1")
        );
        assert_eq!(config.filtering.delimiters, vec!["#{*}"]);
        assert_eq!(config.filtering.project.version.as_deref(), Some("2.0"));
        Ok(())
    }

    #[test]
    fn test_missing_output_is_error() -> Result<()> {
        let source = tempdir()?;
        let result = ConfigBuilder::new()
            .source(source.path().to_str().unwrap())
            .build();
        assert!(result.unwrap_err().to_string().contains("output directory is required"));
        Ok(())
    }

    #[test]
    fn test_output_equal_to_source_is_error() -> Result<()> {
        let source = tempdir()?;
        let path = source.path().to_str().unwrap();
        let result = ConfigBuilder::new().source(path).output(path).build();
        assert!(result.unwrap_err().to_string().contains("must differ"));
        Ok(())
    }

    #[test]
    fn test_invalid_line_ending_is_error() -> Result<()> {
        let source = tempdir()?;
        let output = tempdir()?;
        let result = ConfigBuilder::new()
            .source(source.path().to_str().unwrap())
            .output(output.path().to_str().unwrap())
            .line_ending("sideways")
            .build();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Illegal lineEnding specified: 'sideways'"));
        Ok(())
    }

    #[test]
    fn test_invalid_encoding_and_delimiter_are_errors() -> Result<()> {
        let source = tempdir()?;
        let output = tempdir()?;
        let base = ConfigBuilder::new()
            .source(source.path().to_str().unwrap())
            .output(output.path().to_str().unwrap());

        let err = base.clone().encoding("nope").build().unwrap_err();
        assert!(err.to_string().contains("Unsupported encoding"));

        let err = base.delimiters(vec!["*".to_string()]).build().unwrap_err();
        assert!(err.to_string().contains("Invalid delimiter specification"));
        Ok(())
    }

    #[test]
    fn test_project_properties_file_then_overrides() -> Result<()> {
        let source = tempdir()?;
        let output = tempdir()?;
        let props = source.path().join("project.properties");
        fs::write(&props, "a=file\nb=file\n")?;

        let config = ConfigBuilder::new()
            .source(source.path().to_str().unwrap())
            .output(output.path().to_str().unwrap())
            .project_properties_file(props.to_str().unwrap())
            .project_property("b", "override")
            .build()?;
        let project = &config.filtering.project.properties;
        assert_eq!(project.get("a").map(String::as_str), Some("file"));
        assert_eq!(project.get("b").map(String::as_str), Some("override"));
        Ok(())
    }

    #[test]
    fn test_nonexistent_source_is_error() {
        let result = ConfigBuilder::new()
            .source("definitely/not/a/real/dir")
            .output("out")
            .build();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to resolve source directory"));
    }
}
