//! Species label file reading.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read the species label list from file.
///
/// # File Format
/// - One species per line (e.g., `Leopard`)
/// - Line order is significant: line N labels the model's output index N
/// - Blank lines are ignored
///
/// # Errors
/// - Returns error if the file cannot be read
/// - Returns error if the file contains no species
pub fn read_labels(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| Error::LabelsRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let reader = BufReader::new(file);
    let mut labels = Vec::new();

    for line in reader.lines() {
        let line = line.map_err(|e| Error::LabelsRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let trimmed = line.trim();
        if !trimmed.is_empty() {
            labels.push(trimmed.to_string());
        }
    }

    if labels.is_empty() {
        return Err(Error::LabelsEmpty {
            path: path.to_path_buf(),
        });
    }

    Ok(labels)
}
