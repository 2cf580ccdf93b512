//! Export command implementation.

use crate::cli::{ExportArgs, ExportKind};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;
use barometre_export::{default_archive_name, export_json, write_archive, write_workbook, PROJECT_ENTRY, WORKBOOK_ENTRY};
use chrono::Local;
use std::fs;
use std::path::PathBuf;

/// Execute the export command.
pub fn execute_export(args: ExportArgs, session: &mut Session, config: &Config, formatter: &Formatter) -> Result<()> {
    let path = output_path(&args, config);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    match args.kind {
        ExportKind::Json => fs::write(&path, export_json(&session.project)?)?,
        ExportKind::Xlsx => write_workbook(&session.project, &path)?,
        ExportKind::Zip => write_archive(&session.project, &path)?,
    }

    println!("{}", formatter.success(&format!("Exported to {}", path.display())));
    Ok(())
}

/// Explicit output file, or the standard name for the kind in the export directory.
fn output_path(args: &ExportArgs, config: &Config) -> PathBuf {
    if let Some(path) = &args.output {
        return path.clone();
    }
    let name = match args.kind {
        ExportKind::Json => PROJECT_ENTRY.to_string(),
        ExportKind::Xlsx => WORKBOOK_ENTRY.to_string(),
        ExportKind::Zip => default_archive_name(Local::now()),
    };
    config.export_path(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use barometre_domain::Project;
    use barometre_export::archive_entries;
    use tempfile::TempDir;

    fn session() -> Session {
        let mut project = Project::new();
        project.add_participant("Alice", "RH").unwrap();
        project.set_declared_total(2).unwrap();
        Session::new(project, "test.json")
    }

    #[test]
    fn test_default_names_use_export_dir() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.settings.export_dir = Some(dir.path().to_path_buf());

        let json = output_path(&ExportArgs { kind: ExportKind::Json, output: None }, &config);
        assert_eq!(json, dir.path().join("barometre_projet.json"));

        let zip = output_path(&ExportArgs { kind: ExportKind::Zip, output: None }, &config);
        let name = zip.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("barometre_projet_export_"));
        assert!(name.ends_with(".zip"));
    }

    #[test]
    fn test_export_zip_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("archive.zip");
        let formatter = Formatter::new(OutputFormat::Table, false);
        let mut session = session();

        execute_export(
            ExportArgs {
                kind: ExportKind::Zip,
                output: Some(path.clone()),
            },
            &mut session,
            &Config::default(),
            &formatter,
        )
        .unwrap();

        let entries = archive_entries(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(entries, vec!["barometre_projet.json", "relations_barometre.xlsx"]);
        assert!(!session.is_modified());
    }
}
