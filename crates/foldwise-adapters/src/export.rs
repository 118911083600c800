//! Writing exported instructions to disk.

use crate::config::write_atomic;
use anyhow::Context;
use foldwise_core::ExportedInstructions;
use std::fs;
use std::path::{Path, PathBuf};

const FALLBACK_FILENAME: &str = "book_folding_pattern.txt";

/// The server picks the file name; only its final component is trusted, so
/// the file always lands directly inside `dir`.
fn safe_filename(suggested: &str) -> String {
    let name = Path::new(suggested.trim())
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    if name.is_empty() || name.starts_with('.') {
        FALLBACK_FILENAME.to_string()
    } else {
        name.to_string()
    }
}

/// Save the instructions under `dir`, creating it if needed. Returns the
/// written path.
pub fn save_instructions(dir: &Path, exported: &ExportedInstructions) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
    let path = dir.join(safe_filename(&exported.filename));
    write_atomic(&path, &exported.instructions)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "instructions saved");
    Ok(path)
}
