//! Error types for the league database

use rusqlite::ffi;
use thiserror::Error;


pub type Result<T> = std::result::Result<T, LeagueError>;

#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(#[source] rusqlite::Error),

    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(#[source] rusqlite::Error),

    #[error("Required field missing: {0}")]
    NotNullViolation(#[source] rusqlite::Error),

    #[error("Database error: {0}")]
    Database(#[source] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse id: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("Invalid {kind} value: {value}")]
    InvalidEnumValue { kind: &'static str, value: i64 },

    #[error("Unknown {kind}: {label}")]
    InvalidEnumLabel { kind: &'static str, label: String },

    #[error("No migration with version {version}")]
    UnknownMigration { version: u32 },

    #[error("Database schema version {found} is newer than the latest known version {latest}")]
    SchemaTooNew { found: u32, latest: u32 },

    #[error("Database schema is not migrated (run `goonpug migrate up`)")]
    SchemaNotMigrated,

    #[error("Could not determine data directory and {env_var} is not set")]
    MissingDataDir { env_var: String },
}

impl LeagueError {
    /// True for any of the three constraint classes raised by the engine.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            LeagueError::UniqueViolation(_)
                | LeagueError::ForeignKeyViolation(_)
                | LeagueError::NotNullViolation(_)
        )
    }
}

impl From<rusqlite::Error> for LeagueError {
    fn from(err: rusqlite::Error) -> Self {
        // Enum columns reject undocumented codes by raising a LeagueError from FromSql.
        let err = match err {
            rusqlite::Error::FromSqlConversionFailure(idx, ty, source) => {
                return match source.downcast::<LeagueError>() {
                    Ok(inner) => *inner,
                    Err(source) => LeagueError::Database(
                        rusqlite::Error::FromSqlConversionFailure(idx, ty, source),
                    ),
                };
            }
            err => err,
        };

        let extended_code = match &err {
            rusqlite::Error::SqliteFailure(e, _) if e.code == ffi::ErrorCode::ConstraintViolation => {
                e.extended_code
            }
            _ => return LeagueError::Database(err),
        };

        match extended_code {
            ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                LeagueError::UniqueViolation(err)
            }
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => LeagueError::ForeignKeyViolation(err),
            ffi::SQLITE_CONSTRAINT_NOTNULL => LeagueError::NotNullViolation(err),
            _ => LeagueError::Database(err),
        }
    }
}
