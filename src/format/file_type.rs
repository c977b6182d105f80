// src/format/file_type.rs

use crate::constants::{BINARY_CONTAINER_SUFFIXES, PROPERTY_FILE_SUFFIX};

/// Checks whether a resource name denotes a Java properties file.
///
/// The comparison is case-insensitive.
///
/// # Examples
///
/// ```
/// use assembly_filter::format::is_property_file;
///
/// assert!(is_property_file("conf/app.properties"));
/// assert!(is_property_file("APP.PROPERTIES"));
/// assert!(!is_property_file("app.properties.bak"));
/// ```
pub fn is_property_file(name: &str) -> bool {
    name.to_lowercase().ends_with(PROPERTY_FILE_SUFFIX)
}

/// Checks whether a resource name denotes an archive whose bytes must not be
/// treated as text (`.zip`, `.jar`, case-insensitive).
///
/// # Examples
///
/// ```
/// use assembly_filter::format::is_binary_container;
///
/// assert!(is_binary_container("lib/app.JAR"));
/// assert!(is_binary_container("archive.zip"));
/// assert!(!is_binary_container("zip.txt"));
/// ```
pub fn is_binary_container(name: &str) -> bool {
    let lower = name.to_lowercase();
    BINARY_CONTAINER_SUFFIXES
        .iter()
        .any(|suffix| lower.ends_with(suffix))
}

/// Checks whether a resource name ends with `.<ext>` for one of `extensions`.
///
/// Extensions are stored without their leading dot and compared case-sensitively,
/// so `txt` excludes `readme.txt` but not `README.TXT`.
pub fn has_non_filtered_extension(name: &str, extensions: &[String]) -> bool {
    extensions.iter().any(|ext| {
        name.len() > ext.len()
            && name.ends_with(ext.as_str())
            && name[..name.len() - ext.len()].ends_with('.')
    })
}
