//! Closed enumerations stored as integer columns.
//!
//! SQLite accepts any integer in these columns. The application layer does
//! not: converting an undocumented code, either from a row or through
//! [`from_code`](MatchStatus::from_code), fails with
//! [`LeagueError::InvalidEnumValue`].
//!
//! # Examples
//!
//! ```rust
//! use goonpug::types::{MapMode, MatchStatus};
//!
//! assert_eq!(MatchStatus::from_code(2).unwrap(), MatchStatus::Live);
//! assert_eq!(MapMode::Bo3.label(), "Best of 3");
//! assert!(MatchStatus::from_code(17).is_err());
//! ```

use crate::error::{LeagueError, Result};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident = $code:literal => $label:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every documented value, in code order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Human-readable name of this enumeration, used in errors.
            pub const KIND: &'static str = $kind;

            /// Integer code stored in the database.
            pub fn code(&self) -> i64 {
                match self {
                    $($name::$variant => $code),+
                }
            }

            /// Convert a stored code, refusing anything undocumented.
            pub fn from_code(code: i64) -> Result<Self> {
                match code {
                    $($code => Ok($name::$variant),)+
                    _ => Err(LeagueError::InvalidEnumValue {
                        kind: $kind,
                        value: code,
                    }),
                }
            }

            /// Display label.
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.label())
            }
        }

        impl FromStr for $name {
            type Err = LeagueError;

            fn from_str(s: &str) -> Result<Self> {
                let wanted = s.trim().to_lowercase();
                $(
                    if wanted == stringify!($variant).to_lowercase()
                        || wanted == $label.to_lowercase()
                        $(|| wanted == $alias)*
                    {
                        return Ok($name::$variant);
                    }
                )+
                Err(LeagueError::InvalidEnumLabel {
                    kind: $kind,
                    label: s.to_string(),
                })
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.code()))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                let code = i64::column_result(value)?;
                $name::from_code(code).map_err(|e| FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

coded_enum! {
    /// Lifecycle state of a match.
    MatchStatus, "match status" {
        Unknown = 0 => "Unknown",
        Pending = 1 => "Pending",
        Live = 2 => "Live",
        Complete = 3 => "Complete" | "completed",
        Cancelled = 4 => "Cancelled" | "canceled",
    }
}

coded_enum! {
    /// Competition ruleset a match is configured for.
    Ruleset, "ruleset" {
        Custom = 0 => "Custom",
        Esea = 1 => "ESEA/ESL" | "esl",
        Cevo = 2 => "CEVO",
    }
}

coded_enum! {
    /// Best-of-N map format.
    MapMode, "map mode" {
        Bo1 = 0 => "Standard" | "best of 1",
        Bo2 = 1 => "Best of 2",
        Bo3 = 2 => "Best of 3",
    }
}

coded_enum! {
    /// Which of the two rostered teams something belongs to.
    TeamSlot, "team" {
        Other = 0 => "Other",
        A = 1 => "Team A" | "team_a",
        B = 2 => "Team B" | "team_b",
    }
}

coded_enum! {
    /// In-game side.
    Side, "side" {
        Other = 0 => "Other",
        Ct = 1 => "CT" | "counter-terrorist",
        T = 2 => "T" | "terrorist",
    }
}

coded_enum! {
    /// Regulation or overtime breakdown of a map score.
    ScoreType, "score type" {
        Regulation = 0 => "Regulation",
        Overtime = 1 => "OT",
    }
}

coded_enum! {
    /// How a round was decided.
    WinType, "win type" {
        Normal = 0 => "Normal",
        Defused = 1 => "Bomb was defused",
        Exploded = 2 => "Bomb was exploded",
        Saved = 3 => "Bomb site was saved",
    }
}

impl Default for MatchStatus {
    fn default() -> Self {
        MatchStatus::Pending
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Ruleset::Esea
    }
}

impl Default for MapMode {
    fn default() -> Self {
        MapMode::Bo1
    }
}

impl Default for TeamSlot {
    fn default() -> Self {
        TeamSlot::Other
    }
}

impl Default for ScoreType {
    fn default() -> Self {
        ScoreType::Regulation
    }
}

impl Default for WinType {
    fn default() -> Self {
        WinType::Normal
    }
}

impl MapMode {
    /// Most maps a match in this mode can contain.
    pub fn max_maps(&self) -> usize {
        match self {
            MapMode::Bo1 => 1,
            MapMode::Bo2 => 2,
            MapMode::Bo3 => 3,
        }
    }
}

impl MatchStatus {
    /// Complete and cancelled matches no longer change.
    pub fn is_final(&self) -> bool {
        matches!(self, MatchStatus::Complete | MatchStatus::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_codes_round_trip() {
        for status in MatchStatus::ALL {
            assert_eq!(MatchStatus::from_code(status.code()).unwrap(), *status);
        }
        for win_type in WinType::ALL {
            assert_eq!(WinType::from_code(win_type.code()).unwrap(), *win_type);
        }
    }

    #[test]
    fn test_code_values_are_fixed() {
        assert_eq!(MatchStatus::Unknown.code(), 0);
        assert_eq!(MatchStatus::Cancelled.code(), 4);
        assert_eq!(Ruleset::Cevo.code(), 2);
        assert_eq!(MapMode::Bo2.code(), 1);
        assert_eq!(TeamSlot::B.code(), 2);
        assert_eq!(Side::Ct.code(), 1);
        assert_eq!(Side::T.code(), 2);
        assert_eq!(ScoreType::Overtime.code(), 1);
        assert_eq!(WinType::Saved.code(), 3);
    }

    #[test]
    fn test_undocumented_codes_are_rejected() {
        match MatchStatus::from_code(5) {
            Err(LeagueError::InvalidEnumValue { kind, value }) => {
                assert_eq!(kind, "match status");
                assert_eq!(value, 5);
            }
            other => panic!("Expected InvalidEnumValue, got {:?}", other),
        }
        assert!(Side::from_code(-1).is_err());
        assert!(WinType::from_code(4).is_err());
        assert!(MapMode::from_code(3).is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Ruleset::Esea.to_string(), "ESEA/ESL");
        assert_eq!(MapMode::Bo1.to_string(), "Standard");
        assert_eq!(WinType::Exploded.to_string(), "Bomb was exploded");
        assert_eq!(TeamSlot::A.to_string(), "Team A");
    }

    #[test]
    fn test_parse_by_variant_label_and_alias() {
        assert_eq!("live".parse::<MatchStatus>().unwrap(), MatchStatus::Live);
        assert_eq!("canceled".parse::<MatchStatus>().unwrap(), MatchStatus::Cancelled);
        assert_eq!("BO3".parse::<MapMode>().unwrap(), MapMode::Bo3);
        assert_eq!("esea/esl".parse::<Ruleset>().unwrap(), Ruleset::Esea);
        assert_eq!("ct".parse::<Side>().unwrap(), Side::Ct);
        assert_eq!("OT".parse::<ScoreType>().unwrap(), ScoreType::Overtime);
        assert!("spectator".parse::<Side>().is_err());
    }

    #[test]
    fn test_defaults_match_column_defaults() {
        assert_eq!(MatchStatus::default(), MatchStatus::Pending);
        assert_eq!(Ruleset::default(), Ruleset::Esea);
        assert_eq!(MapMode::default(), MapMode::Bo1);
        assert_eq!(TeamSlot::default(), TeamSlot::Other);
        assert_eq!(ScoreType::default(), ScoreType::Regulation);
        assert_eq!(WinType::default(), WinType::Normal);
    }

    #[test]
    fn test_max_maps() {
        assert_eq!(MapMode::Bo1.max_maps(), 1);
        assert_eq!(MapMode::Bo2.max_maps(), 2);
        assert_eq!(MapMode::Bo3.max_maps(), 3);
    }
}
