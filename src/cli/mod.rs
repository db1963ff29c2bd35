//! CLI argument definitions and parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
pub enum MigrateCmd {
    /// Apply pending migrations.
    Up {
        /// Stop after this version (default: latest).
        #[clap(long)]
        to: Option<u32>,
    },

    /// Roll back applied migrations.
    Down {
        /// Roll back to this version, leaving it applied (default: 0, empty schema).
        #[clap(long)]
        to: Option<u32>,
    },

    /// List known migrations and whether each is applied.
    Status {
        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Move the schema between versions.
    Migrate {
        #[clap(subcommand)]
        cmd: MigrateCmd,
    },

    /// Print the tables and indexes currently defined.
    Schema {
        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Check stored rows against the producer contracts.
    ///
    /// Exits with status 1 when any violation is found.
    Audit {
        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[clap(
    name = "goonpug",
    version,
    about = "Manage a league database: migrations, schema inspection and data audits"
)]
pub struct Goonpug {
    /// Database file (or set `GOONPUG_DATABASE` env var).
    #[clap(long, short, global = true)]
    pub database: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}
