//! Project archive: the JSON project file and the workbook in one zip

use crate::error::ExportError;
use crate::project_file::{export_json, import_json};
use crate::workbook::build_workbook;
use barometre_domain::Project;
use chrono::{DateTime, Local};
use std::io::{Cursor, Read, Write};
use std::path::Path;
use tracing::info;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Name of the JSON entry
pub const PROJECT_ENTRY: &str = "barometre_projet.json";

/// Name of the workbook entry
pub const WORKBOOK_ENTRY: &str = "relations_barometre.xlsx";

/// Default archive file name for an export made at `now`
pub fn default_archive_name(now: DateTime<Local>) -> String {
    format!("barometre_projet_export_{}.zip", now.format("%Y%m%d_%H%M%S"))
}

/// Build the archive in memory
pub fn build_archive(project: &Project) -> Result<Vec<u8>, ExportError> {
    let json = export_json(project)?;
    let workbook = build_workbook(project)?;

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    writer.start_file(PROJECT_ENTRY, options)?;
    writer.write_all(json.as_bytes())?;
    writer.start_file(WORKBOOK_ENTRY, options)?;
    writer.write_all(&workbook)?;

    let bytes = writer.finish()?.into_inner();
    info!(bytes = bytes.len(), "Archive built");
    Ok(bytes)
}

/// Build the archive and write it to `path`
pub fn write_archive(project: &Project, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let bytes = build_archive(project)?;
    std::fs::write(path.as_ref(), bytes)?;
    info!(path = %path.as_ref().display(), "Archive written");
    Ok(())
}

/// Names of the entries in an archive, in stored order
pub fn archive_entries(bytes: &[u8]) -> Result<Vec<String>, ExportError> {
    let archive = ZipArchive::new(Cursor::new(bytes))?;
    Ok(archive.file_names().map(str::to_string).collect())
}

/// Load the project stored in an archive
pub fn import_archive(bytes: &[u8]) -> Result<Project, ExportError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut entry = archive.by_name(PROJECT_ENTRY).map_err(|e| match e {
        zip::result::ZipError::FileNotFound => ExportError::MissingEntry(PROJECT_ENTRY.to_string()),
        other => ExportError::Archive(other),
    })?;

    let mut text = String::new();
    entry.read_to_string(&mut text)?;
    import_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_archive_name() {
        let now = Local.with_ymd_and_hms(2024, 7, 9, 8, 5, 3).unwrap();
        assert_eq!(default_archive_name(now), "barometre_projet_export_20240709_080503.zip");
    }

    #[test]
    fn test_missing_project_entry() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file("other.txt", SimpleFileOptions::default()).unwrap();
        writer.write_all(b"hello").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        assert!(matches!(import_archive(&bytes), Err(ExportError::MissingEntry(_))));
    }
}
