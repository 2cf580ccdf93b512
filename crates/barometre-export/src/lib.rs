//! Barometre Export Layer
//!
//! Turns a [`Project`](barometre_domain::Project) into files and back:
//!
//! - [`project_file`]: the JSON project file, the only format that can be re-imported
//! - [`workbook`]: the six-sheet spreadsheet of every derived view
//! - [`archive`]: both of the above in a single zip
//!
//! Every export is a read-only pass over a project snapshot. Imports build a
//! fresh project and never modify an existing one.
//!
//! # Examples
//!
//! ```
//! use barometre_domain::Project;
//! use barometre_export::{export_json, import_json};
//!
//! let mut project = Project::new();
//! project.add_participant("Alice", "RH").unwrap();
//!
//! let json = export_json(&project).unwrap();
//! let restored = import_json(&json).unwrap();
//! assert_eq!(restored.participants(), project.participants());
//! ```

#![warn(missing_docs)]

pub mod archive;
pub mod error;
pub mod project_file;
pub mod workbook;

pub use archive::{
    archive_entries, build_archive, default_archive_name, import_archive, write_archive, PROJECT_ENTRY,
    WORKBOOK_ENTRY,
};
pub use error::ExportError;
pub use project_file::{export_json, import_json, ProjectFile};
pub use workbook::{build_workbook, write_workbook, SHEET_NAMES};
