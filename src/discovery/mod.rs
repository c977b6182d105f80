//! Discovers the files of a file set.
use crate::cancellation::CancellationToken;
use crate::config::FileSetConfig;
use crate::core_types::FileResource;
use crate::errors::{io_error_with_path, Error, Result};
use log::debug;

mod entry_processor;
mod walker;

use entry_processor::process_direntry;
use walker::{build_walker, resolved_output};

/// Walks the file-set root and returns every file selected by the include and
/// exclude globs, sorted by name.
///
/// Globs are matched against the `/`-separated name relative to the root. The
/// output directory is skipped when it lies under the root.
///
/// # Errors
/// * [`Error::Interrupted`] if `token` is cancelled during the walk.
/// * [`Error::Io`] if a directory cannot be read.
///
/// # Examples
///
/// ```
/// use assembly_filter::config::Config;
/// use assembly_filter::discovery::discover_files;
/// use assembly_filter::CancellationToken;
/// use std::fs;
/// use tempfile::tempdir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let temp = tempdir()?;
/// fs::create_dir(temp.path().join("conf"))?;
/// fs::write(temp.path().join("conf/app.properties"), "a=1")?;
/// fs::write(temp.path().join("README.txt"), "read me")?;
///
/// let mut config = Config::new_for_test();
/// config.file_set.source = temp.path().canonicalize()?;
///
/// let files = discover_files(&config.file_set, &CancellationToken::new())?;
/// let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
/// assert_eq!(names, ["README.txt", "conf/app.properties"]);
/// # Ok(())
/// # }
/// ```
pub fn discover_files(
    config: &FileSetConfig,
    token: &CancellationToken,
) -> Result<Vec<FileResource>> {
    if token.is_cancelled() {
        return Err(Error::Interrupted);
    }

    let output = resolved_output(config);
    let walker = build_walker(config)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !entry.path().starts_with(&output));

    let mut files = Vec::new();
    for entry in walker {
        if token.is_cancelled() {
            return Err(Error::Interrupted);
        }
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| config.source.clone());
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
            io_error_with_path(source, path)
        })?;
        if let Some(resource) = process_direntry(&entry, config)? {
            files.push(resource);
        }
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    debug!(
        "Discovered {} file(s) under '{}'",
        files.len(),
        config.source.display()
    );
    Ok(files)
}
