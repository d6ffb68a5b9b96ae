//! FILENAME: core/export/src/artifact.rs
//! PURPOSE: Rendered report bytes and their delivery to disk.
//! CONTEXT: Writes go through a temporary file in the destination directory
//! and are renamed into place, so a failed render or write never leaves a
//! partial file behind.

use crate::error::ExportError;
use crate::OutputFormat;
use std::io::Write;
use std::path::{Path, PathBuf};

const FALLBACK_FILE_NAME: &str = "reporte";

/// A finished report file, held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub format: OutputFormat,
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// Number of data rows rendered, header excluded.
    pub rows: usize,
}

impl Artifact {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// File name for `base` with the format's extension. Path separators and
/// other characters unsafe in file names are replaced with `_`.
pub fn artifact_file_name(base: &str, format: OutputFormat) -> String {
    let cleaned: String = base
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches('.');
    let stem = if cleaned.is_empty() { FALLBACK_FILE_NAME } else { cleaned };
    format!("{}.{}", stem, format.extension())
}

/// Writes the artifact into `dir` atomically and returns the final path.
pub fn write_artifact(artifact: &Artifact, dir: &Path) -> Result<PathBuf, ExportError> {
    let target = dir.join(&artifact.file_name);

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(&artifact.bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(&target).map_err(|e| ExportError::Io(e.error))?;

    log::info!(
        "wrote {} report ({} bytes, {} rows) to {}",
        artifact.format,
        artifact.bytes.len(),
        artifact.rows,
        target.display()
    );
    Ok(target)
}
