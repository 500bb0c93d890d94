//! JSON document helpers with atomic replacement

use std::fs;
use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Read and decode a JSON document.
///
/// Creates the parent directory when missing. Returns `Ok(None)` when the
/// document itself does not exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    ensure_parent_dir(path)?;

    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(error) => return Err(Error::from_io(path, error)),
    };

    serde_json::from_slice(&raw)
        .map(Some)
        .map_err(|source| Error::CorruptStore {
            path: path.to_path_buf(),
            source,
        })
}

/// Serialize `value` as pretty JSON and atomically replace the document at `path`
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let dir = ensure_parent_dir(path)?;
    let content = serde_json::to_vec_pretty(value)?;

    let file_name = path
        .file_name()
        .map_or_else(|| "document".into(), |name| name.to_string_lossy());
    let tmp_path = dir.join(format!(".{file_name}-{}.tmp", Uuid::new_v4()));

    if let Err(error) = fs::write(&tmp_path, content) {
        let _ = fs::remove_file(&tmp_path);
        return Err(Error::from_io(path, error));
    }
    if let Err(error) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(Error::from_io(path, error));
    }
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<&Path> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|error| Error::from_io(dir, error))?;
    Ok(dir)
}
