//! Type-safe ids and closed enumerations for league data.

pub mod enums;
pub mod ids;

pub use enums::{MapMode, MatchStatus, Ruleset, ScoreType, Side, TeamSlot, WinType};
pub use ids::*;
