//! Import command implementation.

use crate::cli::ImportArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::session::{load_project, Session};

/// Execute the import command.
///
/// The current project is replaced only once the file has been read and
/// validated in full.
pub fn execute_import(args: ImportArgs, session: &mut Session, formatter: &Formatter) -> Result<()> {
    let project = load_project(&args.file)?;
    let participants = project.participants().len();
    let relations = project.relations().len();

    session.project.replace_with(project);
    session.mark_modified();

    println!(
        "{}",
        formatter.success(&format!(
            "Imported {} participant(s) and {} relation(s) from {}",
            participants,
            relations,
            args.file.display()
        ))
    );
    Ok(())
}
