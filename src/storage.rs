//! Catalog ingestion.
//!
//! The catalog arrives as one JSON file: a top-level object mapping course
//! names to course records. The file is read once at startup; the resulting
//! [`Catalog`] is immutable from then on.
//!
//! Decoding is deliberately tolerant. Scraped catalog data carries gaps and
//! the occasional malformed subtree, and a single bad node must never take
//! down the whole catalog: malformed requirement nodes and unrecognizable
//! course entries are dropped with a warning, and every presentation path
//! degrades gracefully from there. The only hard failures are "file
//! unreadable" and "not JSON at all".

mod catalog_file;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use thiserror::Error;
use tracing::instrument;

use crate::domain::Catalog;

/// Errors loading a catalog file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// The file content is not valid JSON.
    #[error("catalog file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON root is not an object.
    #[error("catalog root must be an object mapping course names to records")]
    NotAnObject,
}

/// Loads a catalog from a JSON file on disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or its
/// root is not an object. Malformed individual entries and nodes are dropped
/// with a warning instead.
#[instrument]
pub fn load_catalog(path: &Path) -> Result<Catalog, LoadError> {
    let file = File::open(path)?;
    catalog_from_reader(BufReader::new(file))
}

/// Loads a catalog from any JSON reader.
///
/// # Errors
///
/// Same failure modes as [`load_catalog`], minus the file open.
pub fn catalog_from_reader(reader: impl Read) -> Result<Catalog, LoadError> {
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    catalog_file::decode(value)
}

/// Loads a catalog from a JSON string.
///
/// # Errors
///
/// Same failure modes as [`catalog_from_reader`].
pub fn catalog_from_str(data: &str) -> Result<Catalog, LoadError> {
    let value: serde_json::Value = serde_json::from_str(data)?;
    catalog_file::decode(value)
}
