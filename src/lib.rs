//! goonpug league database
//!
//! Persistent schema for a competitive Counter-Strike league: seasons,
//! teams, servers, matches and their maps and rounds, players, and the
//! per-round, per-match and per-season statistics derived from them.
//!
//! ## Features
//!
//! - **Typed rows**: One model per table, typed ids for every foreign key
//! - **Closed enumerations**: Stored as integers, undocumented codes are
//!   rejected on read
//! - **Reversible migrations**: Every schema step has an exact inverse
//! - **Constraint errors**: Unique, foreign key and not-null failures
//!   surface as distinct [`LeagueError`] variants
//! - **Contract audit**: Reports producer-side inconsistencies the schema
//!   cannot reject
//!
//! ## Quick Start
//!
//! ```rust
//! use goonpug::storage::{LeagueDatabase, Player};
//!
//! # fn example() -> goonpug::Result<()> {
//! let mut db = LeagueDatabase::new_in_memory()?;
//! let id = db.insert(&Player::new("astral", 76561197960287930))?;
//! assert_eq!(db.get::<Player>(id)?.map(|p| p.username), Some("astral".to_string()));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Environment Configuration
//!
//! Point the CLI at a database file without passing `--database` each time:
//! ```bash
//! export GOONPUG_DATABASE=/srv/league/league.db
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use config::{DATABASE_ENV_VAR, LOG_ENV_VAR};
pub use error::{LeagueError, Result};
pub use storage::LeagueDatabase;
pub use types::*;
