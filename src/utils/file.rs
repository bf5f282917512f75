use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error in {path}: {source}")]
    JsonError {
        path: String,
        source: serde_json::Error,
    },
}

/// Reads and deserializes a whole JSON document from disk.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, FileError> {
    if !path.exists() {
        return Err(FileError::NotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)?;
    debug!("Read {} bytes from {}", content.len(), path.display());

    serde_json::from_str(&content).map_err(|source| FileError::JsonError {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_read_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codes.json");
        fs::write(&path, r#"{"VE": "Venezuela"}"#).unwrap();

        let codes: HashMap<String, String> = read_json_file(&path).unwrap();
        assert_eq!(codes.get("VE").map(String::as_str), Some("Venezuela"));
    }

    #[test]
    fn test_read_json_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<Vec<String>, _> = read_json_file(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(FileError::NotFound(_))));
    }

    #[test]
    fn test_read_json_file_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "[{").unwrap();

        let result: Result<Vec<String>, _> = read_json_file(&path);
        assert!(matches!(result, Err(FileError::JsonError { .. })));
    }
}
