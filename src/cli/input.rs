//! Input discovery and loading for CLI commands
//!
//! Resolves the classify command's input path into JSON files and decodes
//! them. A file is used as is; a directory is walked recursively for
//! `*.json` files, returned in path order.

use crate::constants::INPUT_FILE_EXTENSION;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Find the JSON files named by `path`
pub fn discover_inputs(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        anyhow::bail!("Input path {} is neither a file nor a directory", path.display());
    }

    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(path) {
        let entry = entry.context("Failed to walk input directory")?;
        if entry.file_type().is_file()
            && entry
                .path()
                .extension()
                .is_some_and(|ext| ext == INPUT_FILE_EXTENSION)
        {
            files.push(entry.into_path());
        }
    }

    if files.is_empty() {
        anyhow::bail!(
            "No .{} files found under {}",
            INPUT_FILE_EXTENSION,
            path.display()
        );
    }

    files.sort();
    debug!("Discovered {} input files under {}", files.len(), path.display());
    Ok(files)
}

/// Read and decode one JSON file
pub async fn read_json(path: &Path) -> Result<serde_json::Value> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}
