//! Database location resolution

use crate::error::{LeagueError, Result};
use std::path::PathBuf;

/// Environment variable overriding the default database path.
pub const DATABASE_ENV_VAR: &str = "GOONPUG_DATABASE";

/// Pick the database path: explicit argument, then `GOONPUG_DATABASE`,
/// then `<data dir>/goonpug/league.db`.
pub fn resolve_database_path(path: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = path {
        return Ok(path);
    }

    if let Ok(path) = std::env::var(DATABASE_ENV_VAR) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    default_database_path()
}

fn default_database_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| LeagueError::MissingDataDir {
        env_var: DATABASE_ENV_VAR.to_string(),
    })?;
    Ok(data_dir.join("goonpug").join("league.db"))
}

/// Environment variable holding the log filter directive (e.g. `debug`).
pub const LOG_ENV_VAR: &str = "GOONPUG_LOG";
