//! Surrogate key types for league tables.
//!
//! Every table has an auto-incrementing integer primary key. Wrapping each
//! one in its own type keeps a `MatchId` from being passed where a
//! `RoundId` is expected.

use crate::error::{LeagueError, Result};
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! row_id {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(pub i64);

            impl $name {
                pub fn new(id: i64) -> Self {
                    Self(id)
                }

                pub fn as_i64(&self) -> i64 {
                    self.0
                }
            }

            impl From<i64> for $name {
                fn from(id: i64) -> Self {
                    Self(id)
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl FromStr for $name {
                type Err = LeagueError;

                fn from_str(s: &str) -> Result<Self> {
                    Ok(Self(s.parse()?))
                }
            }

            impl ToSql for $name {
                fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                    Ok(ToSqlOutput::from(self.0))
                }
            }

            impl FromSql for $name {
                fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                    i64::column_result(value).map(Self)
                }
            }
        )+
    };
}

row_id!(
    /// Key of a row in `seasons`.
    SeasonId,
    /// Key of a row in `teams`.
    TeamId,
    TeamSeasonId,
    /// Key of a row in `servers`.
    ServerId,
    /// Key of a row in `matches`.
    MatchId,
    /// Key of a row in `match_maps`.
    MatchMapId,
    MatchMapScoreId,
    /// Key of a row in `rounds`.
    RoundId,
    /// Key of a row in `players`. Not the Steam id.
    PlayerId,
    PlayerBanId,
    PlayerIpId,
    PlayerKillId,
    PlayerRoundId,
    PlayerMatchId,
    PlayerSeasonId,
    PlayerMatchWeaponsId,
    PlayerSeasonWeaponsId,
);
