//! The project being edited and the file it belongs to.

use crate::error::Result;
use barometre_domain::Project;
use barometre_export::{export_json, import_archive, import_json};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One editing session: a project, its file, and whether it has unsaved changes.
#[derive(Debug)]
pub struct Session {
    /// Project state
    pub project: Project,
    path: PathBuf,
    modified: bool,
}

impl Session {
    /// Start a session on an in-memory project bound to `path`.
    pub fn new(project: Project, path: impl Into<PathBuf>) -> Self {
        Self {
            project,
            path: path.into(),
            modified: false,
        }
    }

    /// Open the project file at `path`, or start empty if it does not exist yet.
    ///
    /// A project opened from an archive is saved next to it as `.json`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let project = if path.exists() {
            let project = load_project(&path)?;
            info!(path = %path.display(), "Project opened");
            project
        } else {
            debug!(path = %path.display(), "Project file not found, starting empty");
            Project::new()
        };
        Ok(Self::new(project, save_target(path)))
    }

    /// File the project is saved to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the project changed since it was opened or last saved.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Flag the project as changed.
    pub fn mark_modified(&mut self) {
        self.modified = true;
    }

    /// Write the project to its file.
    pub fn save(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, export_json(&self.project)?)?;
        self.modified = false;
        info!(path = %self.path.display(), "Project saved");
        Ok(())
    }

    /// Write the project to another file, which becomes the session's file.
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        self.path = path.into();
        self.save()
    }

    /// Replace the project with the one stored at `path`, which becomes the session's file.
    ///
    /// On error the session is left untouched.
    pub fn load(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let project = load_project(&path)?;
        self.project.replace_with(project);
        self.path = save_target(path);
        self.modified = false;
        Ok(())
    }
}

fn is_archive(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"))
}

/// Archives are read-only; saving goes to the `.json` file beside them.
fn save_target(path: PathBuf) -> PathBuf {
    if is_archive(&path) {
        path.with_extension("json")
    } else {
        path
    }
}

/// Read a project from a JSON project file or a zip archive.
pub fn load_project(path: &Path) -> Result<Project> {
    let project = if is_archive(path) {
        import_archive(&fs::read(path)?)?
    } else {
        import_json(&fs::read_to_string(path)?)?
    };
    Ok(project)
}
