//! Command implementations for the goonpug CLI

pub mod audit;
pub mod migrate;
pub mod schema;


use crate::{config::resolve_database_path, storage::LeagueDatabase, Result};
use std::path::PathBuf;
use tracing::info;

/// Open the database named on the command line, in `GOONPUG_DATABASE`, or at
/// the default location.
pub fn open_database(path: Option<PathBuf>) -> Result<LeagueDatabase> {
    let path = resolve_database_path(path)?;
    info!(path = %path.display(), "Using league database");
    LeagueDatabase::open(&path)
}
