//! Participant command implementation.

use crate::cli::{ParticipantAction, ParticipantArgs};
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;
use std::io::{self, Write};

/// Execute a participant action.
pub fn execute_participant(args: ParticipantArgs, session: &mut Session, formatter: &Formatter) -> Result<()> {
    match args.action {
        ParticipantAction::Add { name, service } => {
            session.project.add_participant(&name, &service)?;
            session.mark_modified();
            println!("{}", formatter.success(&format!("Participant added: {} ({})", name.trim(), service.trim())));
        }
        ParticipantAction::List => {
            println!("{}", formatter.participants(session.project.participants())?);
        }
        ParticipantAction::Rename { old, new } => {
            let updated = session.project.rename_participant(old.trim(), &new)?;
            session.mark_modified();
            println!(
                "{}",
                formatter.success(&format!(
                    "Renamed {} to {} ({} relation(s) updated)",
                    old.trim(),
                    new.trim(),
                    updated
                ))
            );
        }
        ParticipantAction::Service { name, service } => {
            session.project.change_service(name.trim(), &service)?;
            session.mark_modified();
            println!(
                "{}",
                formatter.success(&format!("Service of {} set to {}", name.trim(), service.trim()))
            );
        }
        ParticipantAction::Delete { name, yes } => {
            let involved = session.project.relations().iter().filter(|r| r.involves(name.trim())).count();

            // Confirm deletion unless --yes is specified
            if !yes && !confirm(&format!("Delete {} and {} relation(s)?", name.trim(), involved))? {
                println!("{}", formatter.info("Operation cancelled"));
                return Ok(());
            }

            let removed = session.project.delete_participant(name.trim())?;
            session.mark_modified();
            println!(
                "{}",
                formatter.success(&format!("Participant {} deleted with {} relation(s)", name.trim(), removed))
            );
        }
    }
    Ok(())
}

/// Ask a yes/no question on stdin.
pub(crate) fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    Ok(response.trim().eq_ignore_ascii_case("y"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use barometre_domain::{Indicator, Indicators, Project, RelationDraft};
    use chrono::NaiveDate;

    fn session() -> Session {
        let mut project = Project::new();
        project.add_participant("Alice", "RH").unwrap();
        project.add_participant("Bob", "IT").unwrap();
        project
            .record_relation(
                RelationDraft::new("Alice", "Bob", NaiveDate::from_ymd_opt(2024, 1, 8).unwrap())
                    .window("09:00", "10:00")
                    .indicators(Indicators::none().with(Indicator::IPlus)),
            )
            .unwrap();
        Session::new(project, "test.json")
    }

    fn run(session: &mut Session, action: ParticipantAction) -> Result<()> {
        let formatter = Formatter::new(OutputFormat::Table, false);
        execute_participant(ParticipantArgs { action }, session, &formatter)
    }

    #[test]
    fn test_add_and_duplicate() {
        let mut session = session();
        run(
            &mut session,
            ParticipantAction::Add {
                name: " Chloé ".to_string(),
                service: "Direction".to_string(),
            },
        )
        .unwrap();
        assert_eq!(session.project.participants()[2].name, "Chloé");
        assert!(session.is_modified());

        let result = run(
            &mut session,
            ParticipantAction::Add {
                name: "Alice".to_string(),
                service: "IT".to_string(),
            },
        );
        assert!(result.is_err());
        assert_eq!(session.project.participants().len(), 3);
    }

    #[test]
    fn test_rename_cascades() {
        let mut session = session();
        run(
            &mut session,
            ParticipantAction::Rename {
                old: "Bob".to_string(),
                new: "Robert".to_string(),
            },
        )
        .unwrap();
        assert_eq!(session.project.relations()[0].receiver, "Robert");
    }

    #[test]
    fn test_service_change_keeps_relation_service() {
        let mut session = session();
        run(
            &mut session,
            ParticipantAction::Service {
                name: "Alice".to_string(),
                service: "Finance".to_string(),
            },
        )
        .unwrap();
        assert_eq!(session.project.participant("Alice").unwrap().service, "Finance");
        assert_eq!(session.project.relations()[0].service, "RH");
    }

    #[test]
    fn test_delete_with_yes() {
        let mut session = session();
        run(
            &mut session,
            ParticipantAction::Delete {
                name: "Alice".to_string(),
                yes: true,
            },
        )
        .unwrap();
        assert_eq!(session.project.participants().len(), 1);
        assert!(session.project.relations().is_empty());
    }

    #[test]
    fn test_delete_unknown_leaves_state() {
        let mut session = session();
        let result = run(
            &mut session,
            ParticipantAction::Delete {
                name: "Zoé".to_string(),
                yes: true,
            },
        );
        assert!(result.is_err());
        assert_eq!(session.project.participants().len(), 2);
        assert!(!session.is_modified());
    }
}
