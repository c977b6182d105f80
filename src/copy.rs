//! Copies a file set into the output directory, applying the per-file transform.
//!
//! Files are copied in parallel with Rayon. The transformer is built once per
//! run and shared by every worker.

use crate::cancellation::CancellationToken;
use crate::config::Config;
use crate::core_types::{CopySummary, FileResource};
use crate::discovery::discover_files;
use crate::errors::{io_error_with_path, Error, Result};
use crate::format::{file_set_transformer, FileSetTransformer};
use crate::interpolation::ReaderFilter;
use log::{debug, info};
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::instrument;

/// Result of copying a single file.
#[derive(Debug, Clone, Copy)]
struct FileOutcome {
    transformed: bool,
    bytes: u64,
}

/// Copies every file of the configured file set to `<output>/<name>`.
///
/// The transform is decided once with [`file_set_transformer`]. When it
/// returns `None`, files are copied byte for byte.
///
/// # Errors
/// * [`Error::NoFilesFound`] if the file set is empty.
/// * [`Error::Interrupted`] if `token` is cancelled.
/// * Any error of the transform factory or of the per-file transform. The first
///   failing file aborts the run; files already written are left in place.
pub fn copy_file_set(
    config: &Config,
    engine: Arc<dyn ReaderFilter>,
    token: &CancellationToken,
) -> Result<CopySummary> {
    let span = tracing::info_span!("copy_file_set", source = %config.file_set.source.display());
    let _guard = span.enter();

    let file_set = &config.file_set;
    let transformer = file_set_transformer(
        &config.filtering,
        engine,
        file_set.filtered,
        &file_set.non_filtered_extensions,
        file_set.line_ending.as_deref(),
    )?;

    let files = discover_files(file_set, token)?;
    if files.is_empty() {
        return Err(Error::NoFilesFound);
    }
    info!(
        "Copying {} file(s) to '{}'",
        files.len(),
        file_set.output.display()
    );

    let outcomes = files
        .par_iter()
        .map(|resource| {
            if token.is_cancelled() {
                return Err(Error::Interrupted);
            }
            copy_resource(resource, &file_set.output, transformer.as_ref())
        })
        .collect::<Result<Vec<FileOutcome>>>()?;

    let summary = outcomes
        .iter()
        .fold(CopySummary::default(), |mut summary, outcome| {
            summary.copied += 1;
            if outcome.transformed {
                summary.transformed += 1;
            } else {
                summary.unchanged += 1;
            }
            summary.bytes_written += outcome.bytes;
            summary
        });

    info!(
        "Copied {} file(s) ({} transformed, {} unchanged, {} bytes)",
        summary.copied, summary.transformed, summary.unchanged, summary.bytes_written
    );
    Ok(summary)
}

#[instrument(level = "debug", skip_all, fields(name = %resource.name))]
fn copy_resource(
    resource: &FileResource,
    output_root: &Path,
    transformer: Option<&FileSetTransformer>,
) -> Result<FileOutcome> {
    debug!("Copying file: {} ({} bytes)", resource.name, resource.size);
    let input = File::open(&resource.path).map_err(|e| io_error_with_path(e, &resource.path))?;

    // Transform before touching the destination so a refused file leaves nothing behind.
    let (mut reader, transformed): (Box<dyn Read + Send>, bool) = match transformer {
        Some(t) => (t.transform(&resource.name, input)?, !t.is_pass_through(&resource.name)),
        None => (Box::new(input), false),
    };

    let destination = resource
        .name
        .split('/')
        .fold(output_root.to_path_buf(), |path, part| path.join(part));
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error_with_path(e, parent))?;
    }

    let file = File::create(&destination).map_err(|e| io_error_with_path(e, &destination))?;
    let mut writer = BufWriter::new(file);
    let bytes = io::copy(&mut reader, &mut writer).map_err(|e| io_error_with_path(e, &destination))?;
    writer
        .flush()
        .map_err(|e| io_error_with_path(e, &destination))?;

    Ok(FileOutcome { transformed, bytes })
}
