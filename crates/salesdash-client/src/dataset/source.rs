use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::LoadError;

/// Identity of an on-disk data source at one point in time.
///
/// Two keys compare equal only when the canonical path, modification time,
/// and length all match, so any rewrite of the file produces a different key
/// and two spellings of the same file share one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceKey {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    pub len: u64,
}

pub fn source_key(path: &Path) -> Result<SourceKey, LoadError> {
    let metadata = fs::metadata(path).map_err(|error| map_io_error(path, &error))?;
    if metadata.is_dir() {
        return Err(LoadError::data_load(
            &path.display().to_string(),
            "path is a directory, expected a CSV file",
        ));
    }

    let canonical = fs::canonicalize(path).map_err(|error| map_io_error(path, &error))?;
    Ok(SourceKey {
        path: canonical,
        modified: metadata.modified().ok(),
        len: metadata.len(),
    })
}

pub(crate) fn read_source(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|error| map_io_error(path, &error))
}

fn map_io_error(path: &Path, error: &std::io::Error) -> LoadError {
    match error.kind() {
        ErrorKind::NotFound => LoadError::not_found(path),
        ErrorKind::InvalidData => {
            LoadError::data_load(&path.display().to_string(), "file is not valid UTF-8")
        }
        _ => LoadError::data_load(&path.display().to_string(), error.to_string()),
    }
}
