// src/discovery/walker.rs

use crate::config::FileSetConfig;
use log::debug;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Configures the `WalkDir` over the file-set root.
///
/// Entries come out sorted by file name so the discovered list is stable
/// across runs. Symbolic links are not followed.
pub(super) fn build_walker(config: &FileSetConfig) -> WalkDir {
    debug!(
        "Configuring walker at '{}' (follow_links: false)",
        config.source.display()
    );
    WalkDir::new(&config.source)
        .follow_links(false)
        .sort_by_file_name()
}

/// The output directory as it appears on disk, used to keep a previous run's
/// output out of the file set when it lives under the source root.
pub(super) fn resolved_output(config: &FileSetConfig) -> PathBuf {
    config
        .output
        .canonicalize()
        .unwrap_or_else(|_| config.output.clone())
}
