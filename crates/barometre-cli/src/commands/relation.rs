//! Relation command implementation.

use crate::cli::{RecordArgs, RelationAction, RelationArgs};
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;
use barometre_domain::{Indicators, Relation, RelationDraft};
use chrono::Local;

/// Execute a relation action.
pub fn execute_relation(args: RelationArgs, session: &mut Session, formatter: &Formatter) -> Result<()> {
    match args.action {
        RelationAction::Record(args) => {
            let draft = build_draft(args);
            let id = session.project.record_relation(draft)?;
            session.mark_modified();

            if let Some(relation) = session.project.relation(id) {
                println!("{}", formatter.relation_recorded(id, relation.vigilance()));
            }
        }
        RelationAction::List { participant } => {
            let relations: Vec<&Relation> = session
                .project
                .relations()
                .iter()
                .filter(|r| participant.as_deref().map_or(true, |name| r.involves(name.trim())))
                .collect();
            println!("{}", formatter.relations(&relations)?);
        }
        RelationAction::Delete { ids } => {
            let removed = session.project.delete_relations(&ids);
            if removed > 0 {
                session.mark_modified();
            }
            println!("{}", formatter.bulk_result("Deleted", removed));
            if removed < ids.len() {
                println!(
                    "{}",
                    formatter.warning(&format!("{} id(s) did not match any relation", ids.len() - removed))
                );
            }
        }
        RelationAction::Pairs => {
            println!("{}", formatter.pairs(&session.project.possible_pairs())?);
        }
    }
    Ok(())
}

/// Turn command-line arguments into a draft; the date defaults to today.
fn build_draft(args: RecordArgs) -> RelationDraft {
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    RelationDraft::new(args.sender, args.receiver, date)
        .window(args.start, args.end)
        .indicators(Indicators::from_set(args.indicators))
        .comment(args.comment)
}
