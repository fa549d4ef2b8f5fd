//! FeatureCollection file I/O.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{ConsolidateError, Result};

/// Read a GeoJSON collection from disk.
///
/// A missing file maps to [`ConsolidateError::InputMissing`], invalid JSON
/// to [`ConsolidateError::InputMalformed`]; both are fatal to the run.
pub fn read_collection(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConsolidateError::InputMissing {
                path: path.to_path_buf(),
                source,
            }
        } else {
            ConsolidateError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    serde_json::from_str(&raw).map_err(|err| ConsolidateError::InputMalformed {
        reason: format!("invalid JSON in {}: {err}", path.display()),
    })
}

/// Write a collection as pretty-printed JSON, creating parent directories.
///
/// Serialization happens fully in memory before the file is touched, so a
/// failed run never leaves a partial output file behind.
pub fn write_collection(path: &Path, collection: &Value) -> Result<()> {
    let body = serde_json::to_string_pretty(collection)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ConsolidateError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    fs::write(path, body).map_err(|source| ConsolidateError::Io {
        path: path.to_path_buf(),
        source,
    })
}
