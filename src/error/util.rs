//! Utility functions for error handling
//!
//! This module provides file helpers that attach the path and the purpose of
//! the read to any failure.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, TriageError};

/// Safely read a file to string with rich error information
///
/// # Arguments
/// * `path` - The path to the file to read
/// * `purpose` - Why the file is being read (for error context)
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    if !path.exists() {
        return Err(TriageError::io(
            path,
            purpose,
            io::Error::new(io::ErrorKind::NotFound, "File not found"),
        ));
    }

    if !path.is_file() {
        return Err(TriageError::io(
            path,
            purpose,
            io::Error::new(io::ErrorKind::InvalidInput, "Path is not a file"),
        ));
    }

    fs::read_to_string(path).map_err(|e| {
        let purpose = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                format!("{purpose} (permission denied - check file permissions)")
            }
            io::ErrorKind::InvalidData => {
                format!("{purpose} (file contains invalid UTF-8 data)")
            }
            _ => purpose.to_string(),
        };
        TriageError::io(path, purpose, e)
    })
}

/// Read and deserialize a JSON document from disk
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path, purpose: &str) -> Result<T> {
    let content = safe_read_to_string(path, purpose)?;
    serde_json::from_str(&content)
        .map_err(|e| TriageError::json(format!("{purpose} ({})", path.display()), e))
}
