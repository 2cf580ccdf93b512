//! Barometre CLI - Command-line interface for the relational barometer.

use barometre_cli::commands;
use barometre_cli::repl;
use barometre_cli::{Cli, Command, Config, Formatter, Session};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> barometre_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Load or create config, falling back to defaults
    let loaded = match cli.config.clone() {
        Some(path) => Ok(path),
        None => Config::path(),
    }
    .and_then(|path| Config::load_or_init(&path));
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Could not load configuration, using defaults");
        Config::default()
    });

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    let mut session = Session::open(config.project_path(cli.project))?;

    match cli.command {
        None | Some(Command::Repl) => {
            repl::run_repl(&mut session, &config, &formatter)?;
        }
        Some(command) => {
            commands::execute(command, &mut session, &config, &formatter)?;
            if session.is_modified() {
                session.save()?;
            }
        }
    }

    Ok(())
}

/// `-v` maps to info and `-vv` to debug; otherwise `RUST_LOG` decides, with warn as default.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
