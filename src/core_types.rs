//! Defines the data structures passed between discovery and the copy loop.

use std::path::PathBuf;

/// A file of the file set: the name it is known by and where its bytes live.
///
/// The name is the path relative to the file-set root, always `/`-separated.
/// Transform decisions (extensions, property files, archives) look at the name
/// only.
///
/// # Examples
///
/// ```
/// use assembly_filter::core_types::FileResource;
/// use std::path::PathBuf;
///
/// let resource = FileResource {
///     name: "conf/app.properties".to_string(),
///     path: PathBuf::from("/project/src/assembly/conf/app.properties"),
///     size: 42,
/// };
///
/// assert!(resource.name.ends_with(".properties"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileResource {
    /// Relative, `/`-separated name inside the file set.
    pub name: String,
    /// Absolute path of the source file.
    pub path: PathBuf,
    /// Size of the source file in bytes, from metadata.
    pub size: u64,
}

/// What happened during a file-set copy.
///
/// `copied` counts every file written; `transformed` and `unchanged` split it
/// by whether the bytes went through a transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopySummary {
    /// Number of files written to the output directory.
    pub copied: usize,
    /// Files whose content went through filtering or line-ending conversion.
    pub transformed: usize,
    /// Files copied byte for byte.
    pub unchanged: usize,
    /// Total bytes written.
    pub bytes_written: u64,
}
