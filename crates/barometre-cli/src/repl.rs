//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! The project lives in memory for the whole session. Changes are written
//! only on `save`; `load` and `reset` replace the project wholesale.

use crate::cli::{Cli, Command};
use crate::commands;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::Session;
use clap::error::ErrorKind;
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Run the interactive REPL.
pub fn run_repl(session: &mut Session, config: &Config, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.info("Barometre REPL - Type 'help' for commands, 'exit' to quit"));
    println!("{}", formatter.info(&format!("Project file: {}", session.path().display())));
    println!();

    // Initialize readline editor
    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config)?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut exit_warned = false;

    loop {
        let prompt = if session.is_modified() {
            "barometre*> "
        } else {
            "barometre> "
        };

        match editor.readline(prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        if session.is_modified() && !exit_warned {
                            println!(
                                "{}",
                                formatter.warning("Unsaved changes. Type 'save', or 'exit' again to discard them")
                            );
                            exit_warned = true;
                            continue;
                        }
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        exit_warned = false;
                        if let Err(e) = execute_repl_command(cmd, session, config, formatter) {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug)]
enum ReplCommand {
    Exit,
    Help,
    Save(Option<PathBuf>),
    Load(PathBuf),
    Reset,
    /// Text to print as is (clap help output)
    Message(String),
    Command(Command),
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts = tokenize(line)?;

    let Some(first) = parts.first() else {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    };

    match first.as_str() {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "save" => Ok(ReplCommand::Save(parts.get(1).map(PathBuf::from))),
        "load" => parts
            .get(1)
            .map(|path| ReplCommand::Load(PathBuf::from(path)))
            .ok_or_else(|| CliError::InvalidInput("Usage: load <file>".to_string())),
        "reset" => Ok(ReplCommand::Reset),
        _ => parse_project_command(parts),
    }
}

/// Parse a project command with the same grammar as the command line.
fn parse_project_command(parts: Vec<String>) -> Result<ReplCommand> {
    let args = std::iter::once("barometre".to_string()).chain(parts);
    match Cli::try_parse_from(args) {
        Ok(Cli {
            command: Some(Command::Repl),
            ..
        }) => Err(CliError::InvalidInput("Already in interactive mode".to_string())),
        Ok(Cli {
            command: Some(command),
            ..
        }) => Ok(ReplCommand::Command(command)),
        Ok(Cli { command: None, .. }) => Ok(ReplCommand::Help),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            Ok(ReplCommand::Message(e.to_string()))
        }
        Err(e) => Err(CliError::InvalidInput(e.to_string().trim_end().to_string())),
    }
}

/// Split a line on whitespace, keeping double-quoted text together.
///
/// Single quotes are ordinary characters so names like `d'Arc` need no quoting.
fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut in_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    parts.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_quotes {
        return Err(CliError::InvalidInput("Unterminated quote".to_string()));
    }
    if in_token {
        parts.push(current);
    }
    Ok(parts)
}

/// Execute a REPL command.
fn execute_repl_command(cmd: ReplCommand, session: &mut Session, config: &Config, formatter: &Formatter) -> Result<()> {
    match cmd {
        ReplCommand::Save(path) => {
            match path {
                Some(path) => session.save_as(path)?,
                None => session.save()?,
            }
            println!("{}", formatter.success(&format!("Saved to {}", session.path().display())));
        }
        ReplCommand::Load(path) => {
            session.load(path)?;
            println!(
                "{}",
                formatter.success(&format!(
                    "Loaded {} ({} participant(s), {} relation(s))",
                    session.path().display(),
                    session.project.participants().len(),
                    session.project.relations().len()
                ))
            );
        }
        ReplCommand::Reset => {
            session.project.reset();
            session.mark_modified();
            println!("{}", formatter.success("Project reset"));
        }
        ReplCommand::Message(message) => {
            print!("{}", message);
        }
        ReplCommand::Command(command) => {
            commands::execute(command, session, config, formatter)?;
        }
        ReplCommand::Exit | ReplCommand::Help => {}
    }

    Ok(())
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  participant add <name> <service>     - Add a participant");
    println!("  participant list                     - List participants");
    println!("  participant rename <old> <new>       - Rename (relations follow)");
    println!("  participant service <name> <service> - Change a service");
    println!("  participant delete <name> [-y]       - Delete with their relations");
    println!("  total [n]                            - Show or set the declared total");
    println!("  relation record <from> <to> --start <t> --end <t> -i <P+,I-,...>");
    println!("           [--date DD/MM/YYYY] [--comment <text>]");
    println!("  relation list [--participant <name>] - List recorded relations");
    println!("  relation delete <id> [id2] ...       - Delete relations by id (renumbered on load)");
    println!("  relation pairs                       - Possible pairs of named participants");
    println!("  view <relations|unidirectional|negative-cross|positive-cross|recap>");
    println!("  stats                                - Vigilance recap");
    println!("  export [-k json|xlsx|zip] [-o file]  - Export the project");
    println!("  import <file>                        - Replace the project with a file");
    println!("  new [-t n]                           - Start an empty project");
    println!("  save [file]                          - Write the project file");
    println!("  load <file>                          - Open another project file");
    println!("  reset                                - Clear the project");
    println!("  help, ?                              - Show this help");
    println!("  exit, quit, q                        - Exit REPL");
    println!();
    println!("  Use double quotes for values with spaces: participant add \"Jean Dupont\" RH");
    println!();
}
