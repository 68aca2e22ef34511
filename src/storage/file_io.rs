//! JSON file helpers
//!
//! Writes go to a sibling temp file that is synced and renamed over the
//! target, so a crash leaves either the old or the new document on disk.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::BuckwheatError;

/// Read a JSON document, falling back to `T::default()` when the file is absent
pub fn read_json<T, P>(path: P) -> Result<T, BuckwheatError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        tracing::debug!(path = %path.display(), "no file yet, using defaults");
        return Ok(T::default());
    }

    parse_file(path)
}

/// Read a JSON document that must exist
pub fn read_json_required<T, P>(path: P) -> Result<T, BuckwheatError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Err(BuckwheatError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }

    parse_file(path)
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T, BuckwheatError> {
    let file = File::open(path).map_err(|e| {
        BuckwheatError::Storage(format!("Failed to open {}: {}", path.display(), e))
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        BuckwheatError::Storage(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Write a JSON document atomically (temp file, sync, rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), BuckwheatError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            BuckwheatError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| BuckwheatError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| BuckwheatError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| BuckwheatError::Storage(format!("Failed to flush data: {}", e)))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| BuckwheatError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        BuckwheatError::Storage(format!("Failed to replace {}: {}", path.display(), e))
    })?;

    tracing::trace!(path = %path.display(), "wrote json");
    Ok(())
}

/// Whether `path` exists and holds well-formed JSON
pub fn json_file_valid<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    match File::open(path) {
        Ok(file) => serde_json::from_reader::<_, serde_json::Value>(BufReader::new(file)).is_ok(),
        Err(_) => false,
    }
}
