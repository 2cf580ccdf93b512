//! New project and declared total.

use crate::cli::{NewArgs, TotalArgs};
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;
use barometre_domain::Project;

/// Execute the new command.
pub fn execute_new(args: NewArgs, session: &mut Session, formatter: &Formatter) -> Result<()> {
    let mut project = Project::new();
    if let Some(total) = args.total {
        project.set_declared_total(total)?;
    }
    session.project.replace_with(project);
    session.mark_modified();

    println!(
        "{}",
        formatter.success(&format!("New project started ({})", session.path().display()))
    );
    Ok(())
}

/// Execute the total command.
pub fn execute_total(args: TotalArgs, session: &mut Session, formatter: &Formatter) -> Result<()> {
    let Some(total) = args.total else {
        println!(
            "{}",
            formatter.info(&format!(
                "Declared total: {} ({} named participant(s))",
                session.project.declared_total(),
                session.project.named_count()
            ))
        );
        return Ok(());
    };

    session.project.set_declared_total(total)?;
    session.mark_modified();
    println!("{}", formatter.success(&format!("Declared total set to {}", total)));

    let named = session.project.named_count();
    if total < named {
        println!(
            "{}",
            formatter.warning(&format!(
                "The total is below the {} named participant(s); no anonymous persons will be added",
                named
            ))
        );
    }
    Ok(())
}
