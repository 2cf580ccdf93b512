//! Export error types

use barometre_domain::DomainError;
use thiserror::Error;

/// Errors that can occur while writing or reading project files
#[derive(Error, Debug)]
pub enum ExportError {
    /// JSON (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Workbook generation failed
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    /// Archive read or write failed
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Imported data violates a project invariant
    #[error("Invalid project: {0}")]
    Domain(#[from] DomainError),

    /// Imported data is structurally valid JSON but cannot be interpreted
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Archive does not contain the expected entry
    #[error("Archive entry not found: {0}")]
    MissingEntry(String),
}
