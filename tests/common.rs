// tests/common.rs

use std::fs;
use std::path::Path;
use std::process::Command;

// Helper function to get the binary command
#[allow(dead_code)] // This is used by many integration tests, but not all.
pub fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("assembly-filter"))
}

/// Writes `content` to `root/relative_path`, creating parent directories.
#[allow(dead_code)]
pub fn create_file(
    root: &Path,
    relative_path: &str,
    content: impl AsRef<[u8]>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file_path = root.join(relative_path);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(())
}
