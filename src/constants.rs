// src/constants.rs

/// Delimiter spec used when none are configured, and in place of blank entries.
pub const DEFAULT_EXPRESSION_DELIMITER: &str = "${*}";

/// Second default delimiter: `@` both opens and closes an expression.
pub const DEFAULT_AT_DELIMITER: &str = "@";

/// Encoding label always used for filtering property files.
pub const PROPERTY_FILE_ENCODING: &str = "ISO-8859-1";

/// Encoding used when no project encoding has been configured.
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// Name suffix identifying property files (compared case-insensitively).
pub const PROPERTY_FILE_SUFFIX: &str = ".properties";

/// Name suffixes of archive formats that must never have their line endings rewritten.
pub const BINARY_CONTAINER_SUFFIXES: &[&str] = &[".zip", ".jar"];

/// Prefix under which environment variables are exposed to filtering.
pub const ENV_PROPERTY_PREFIX: &str = "env.";

/// Maximum nesting depth when resolving expressions inside property values.
pub const MAX_INTERPOLATION_DEPTH: usize = 64;
