//! CLI command definitions and argument parsing.

use barometre_domain::{parse_date, Indicator, RelationId};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Barometre CLI - Record and analyse the relations inside a group.
#[derive(Debug, Parser)]
#[command(name = "barometre")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Project file to open (created on first save)
    #[arg(short, long, global = true, env = "BAROMETRE_PROJECT")]
    pub project: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start a new, empty project
    New(NewArgs),

    /// Manage participants
    Participant(ParticipantArgs),

    /// Show or set the declared total number of persons
    Total(TotalArgs),

    /// Record, list and delete relations
    Relation(RelationArgs),

    /// Show a derived view
    View(ViewArgs),

    /// Show the vigilance recap
    Stats,

    /// Export the project (JSON, spreadsheet or zip archive)
    Export(ExportArgs),

    /// Replace the project with a project file or archive
    Import(ImportArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the new command.
#[derive(Debug, Parser)]
pub struct NewArgs {
    /// Declared total number of persons
    #[arg(short, long)]
    pub total: Option<usize>,
}

/// Arguments for participant management.
#[derive(Debug, Parser)]
pub struct ParticipantArgs {
    #[command(subcommand)]
    pub action: ParticipantAction,
}

/// Participant management actions.
#[derive(Debug, Subcommand)]
pub enum ParticipantAction {
    /// Add a participant
    Add {
        /// Participant name
        name: String,
        /// Service
        service: String,
    },

    /// List participants
    List,

    /// Rename a participant (relations follow)
    Rename {
        /// Current name
        old: String,
        /// New name
        new: String,
    },

    /// Change the service of a participant
    Service {
        /// Participant name
        name: String,
        /// New service
        service: String,
    },

    /// Delete a participant and every relation involving them
    Delete {
        /// Participant name
        name: String,
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Arguments for the total command.
#[derive(Debug, Parser)]
pub struct TotalArgs {
    /// New total; omit to show the current one
    pub total: Option<usize>,
}

/// Arguments for relation management.
#[derive(Debug, Parser)]
pub struct RelationArgs {
    #[command(subcommand)]
    pub action: RelationAction,
}

/// Relation management actions.
#[derive(Debug, Subcommand)]
pub enum RelationAction {
    /// Record a relation
    Record(RecordArgs),

    /// List recorded relations
    List {
        /// Only relations involving this participant
        #[arg(long)]
        participant: Option<String>,
    },

    /// Delete relations by id
    ///
    /// Ids are renumbered from 1 when a project is loaded or imported, so use
    /// the ids shown by `relation list` in the current session.
    Delete {
        /// Relation ids (as shown by `relation list`)
        #[arg(required = true)]
        ids: Vec<RelationId>,
    },

    /// List every possible (sender, receiver) pair of named participants
    Pairs,
}

/// Arguments for recording a relation.
#[derive(Debug, Parser)]
pub struct RecordArgs {
    /// Sender
    pub sender: String,

    /// Receiver
    pub receiver: String,

    /// Observation date (DD/MM/YYYY, default today)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Start time
    #[arg(long, default_value = "")]
    pub start: String,

    /// End time
    #[arg(long, default_value = "")]
    pub end: String,

    /// Indicators present (P+, P-, I+, I-, C+, C-), comma separated or repeated
    #[arg(short, long = "indicator", value_delimiter = ',')]
    pub indicators: Vec<Indicator>,

    /// Comment
    #[arg(long, default_value = "")]
    pub comment: String,
}

/// Arguments for the view command.
#[derive(Debug, Parser)]
pub struct ViewArgs {
    /// View to show
    #[arg(value_enum)]
    pub kind: ViewKind,
}

/// Derived views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ViewKind {
    /// Every ordered pair, recorded or not
    Relations,
    /// Recorded relations with data
    Unidirectional,
    /// Reciprocal negative pairs
    NegativeCross,
    /// Reciprocal positive pairs
    PositiveCross,
    /// Unidirectional then cross rows
    Recap,
}

/// Arguments for the export command.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// What to export
    #[arg(short, long, value_enum, default_value = "zip")]
    pub kind: ExportKind,

    /// Output file (default: a standard name in the export directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Export kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportKind {
    /// Project file
    Json,
    /// Spreadsheet
    Xlsx,
    /// Zip archive with both
    Zip,
}

/// Arguments for the import command.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// Project file (.json) or archive (.zip)
    pub file: PathBuf,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
