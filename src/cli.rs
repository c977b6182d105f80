// src/cli.rs

use clap::Parser;

/// Copies a file set into an assembly directory, filtering tokens and
/// normalizing line endings on the way.
///
/// Each file under SOURCE is copied to the same relative path under the output
/// directory. With --filtered, expressions such as ${version} or @version@ are
/// replaced by property values from -D, filter files and project properties.
/// With --line-ending, line terminators are rewritten; archives (.zip, .jar)
/// are refused in that case instead of being silently corrupted.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Root directory of the file set.
    #[arg(default_value = ".")]
    pub source: String,

    /// Directory to copy the file set into.
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output: String,

    // --- File Set Selection ---
    /// Copy only files whose relative path matches one of these globs (repeatable).
    #[arg(short = 'i', long = "include", value_name = "GLOB", num_args = 1..)]
    pub includes: Option<Vec<String>>,

    /// Skip files whose relative path matches one of these globs (repeatable).
    /// Takes precedence over --include.
    #[arg(short = 'X', long = "exclude", value_name = "GLOB", num_args = 1..)]
    pub excludes: Option<Vec<String>>,

    // --- Transform Options ---
    /// Replace ${...} / @...@ expressions in file content.
    #[arg(short = 'F', long, action = clap::ArgAction::SetTrue)]
    pub filtered: bool,

    /// Rewrite line endings: keep, unix, lf, dos, windows, crlf or autodetect.
    #[arg(short = 'l', long, value_name = "POLICY")]
    pub line_ending: Option<String>,

    /// Copy files with these extensions unchanged, whatever else is configured (case-sensitive, repeatable).
    #[arg(short = 'x', long = "non-filtered-ext", value_name = "EXT", num_args = 1..)]
    pub non_filtered_extensions: Option<Vec<String>>,

    /// Encoding of filtered files (e.g. UTF-8, ISO-8859-1). Defaults to UTF-8.
    /// Property files are always filtered as ISO-8859-1.
    #[arg(short = 'e', long, value_name = "LABEL")]
    pub encoding: Option<String>,

    /// String that, placed before an expression, prevents its substitution (e.g. '\').
    #[arg(long, value_name = "STRING")]
    pub escape_string: Option<String>,

    /// Expression delimiters such as '${*}' or '@' (repeatable). Defaults to both of those.
    #[arg(long = "delimiter", value_name = "SPEC", num_args = 1..)]
    pub delimiters: Option<Vec<String>>,

    /// Do not double backslashes in substituted values that look like Windows paths.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub no_escape_windows_paths: bool,

    // --- Property Sources ---
    /// Property files providing substitution values (repeatable).
    #[arg(short = 'f', long = "filter", value_name = "FILE", num_args = 1..)]
    pub filters: Option<Vec<String>>,

    /// Project build filter files, used with --include-build-filters (repeatable).
    #[arg(long = "build-filter", value_name = "FILE", num_args = 1..)]
    pub build_filters: Option<Vec<String>>,

    /// Also load the project build filter files.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub include_build_filters: bool,

    /// Property file holding the project properties.
    #[arg(long, value_name = "FILE")]
    pub project_properties: Option<String>,

    /// Project base directory; relative filter files are resolved against it.
    #[arg(long, value_name = "DIR")]
    pub basedir: Option<String>,

    /// Value of ${project.groupId}.
    #[arg(long, value_name = "ID")]
    pub group_id: Option<String>,

    /// Value of ${project.artifactId}.
    #[arg(long, value_name = "ID")]
    pub artifact_id: Option<String>,

    /// Value of ${project.version}.
    #[arg(long, value_name = "VERSION")]
    pub project_version: Option<String>,

    /// Value of ${project.name}.
    #[arg(long, value_name = "NAME")]
    pub project_name: Option<String>,

    /// Additional KEY=VALUE properties; they override every other source (repeatable).
    #[arg(short = 'D', long = "property", value_name = "KEY=VALUE")]
    pub properties: Option<Vec<String>>,
}
