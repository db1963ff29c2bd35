//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use goonpug::{
    cli::{Commands, Goonpug, MigrateCmd},
    commands::{
        audit::handle_audit,
        migrate::{handle_migrate_down, handle_migrate_status, handle_migrate_up},
        open_database,
        schema::handle_schema,
    },
    LOG_ENV_VAR,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Run the CLI.
fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so --json output stays parseable
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let app = Goonpug::parse();
    let mut db = open_database(app.database)?;

    match app.command {
        Commands::Migrate { cmd } => match cmd {
            MigrateCmd::Up { to } => handle_migrate_up(&mut db, to)?,
            MigrateCmd::Down { to } => handle_migrate_down(&mut db, to)?,
            MigrateCmd::Status { json } => handle_migrate_status(&db, json)?,
        },

        Commands::Schema { json } => handle_schema(&db, json)?,

        Commands::Audit { json } => {
            if handle_audit(&db, json)? > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
