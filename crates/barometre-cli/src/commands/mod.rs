//! Command implementations.
//!
//! Every command works on a [`Session`] and flags it as modified when the
//! project changed; the caller decides when to save.

pub mod export;
pub mod import;
pub mod participant;
pub mod project;
pub mod relation;
pub mod view;

pub use self::export::execute_export;
pub use self::import::execute_import;
pub use self::participant::execute_participant;
pub use self::project::{execute_new, execute_total};
pub use self::relation::execute_relation;
pub use self::view::{execute_stats, execute_view};

use crate::cli::Command;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::Session;

/// Run one command against the session.
pub fn execute(command: Command, session: &mut Session, config: &Config, formatter: &Formatter) -> Result<()> {
    match command {
        Command::New(args) => execute_new(args, session, formatter),
        Command::Participant(args) => execute_participant(args, session, formatter),
        Command::Total(args) => execute_total(args, session, formatter),
        Command::Relation(args) => execute_relation(args, session, formatter),
        Command::View(args) => execute_view(args, session, formatter),
        Command::Stats => execute_stats(session, formatter),
        Command::Export(args) => execute_export(args, session, config, formatter),
        Command::Import(args) => execute_import(args, session, formatter),
        Command::Repl => Err(CliError::InvalidInput("Already in interactive mode".to_string())),
    }
}
