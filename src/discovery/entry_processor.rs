// src/discovery/entry_processor.rs

use crate::config::FileSetConfig;
use crate::core_types::FileResource;
use crate::errors::{io_error_with_path, Result};
use log::trace;
use std::path::Path;
use walkdir::DirEntry;

/// Turns a walked entry into a `FileResource`, or `None` if it is filtered out.
///
/// Only regular files are kept. Excludes are checked before includes, and an
/// empty include list accepts every name.
pub(super) fn process_direntry(
    entry: &DirEntry,
    config: &FileSetConfig,
) -> Result<Option<FileResource>> {
    if !entry.file_type().is_file() {
        return Ok(None);
    }

    let path = entry.path();
    let Some(name) = resource_name(path, &config.source) else {
        trace!("Skipping '{}': outside of the file-set root", path.display());
        return Ok(None);
    };

    if config.excludes.iter().any(|p| p.matches(&name)) {
        trace!("Excluded: {}", name);
        return Ok(None);
    }
    if !config.includes.is_empty() && !config.includes.iter().any(|p| p.matches(&name)) {
        trace!("Not included: {}", name);
        return Ok(None);
    }

    let metadata = entry
        .metadata()
        .map_err(|e| io_error_with_path(e.into(), path))?;

    Ok(Some(FileResource {
        name,
        path: path.to_path_buf(),
        size: metadata.len(),
    }))
}

/// Builds the `/`-separated name of `path` relative to `root`.
fn resource_name(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
