//! Producer contract audit
//!
//! The schema accepts several inconsistencies it cannot express as
//! constraints: multi-kill counters that disagree with the kill total, the
//! three redundant round-winner columns drifting apart, a best-of-one match
//! with several maps, and integers outside an enumeration. The ingestion
//! side is responsible for never writing those. This module finds them.
//! It only reads.

use super::{models::StatLine, schema::LeagueDatabase};
use crate::error::{LeagueError, Result};
use crate::types::*;
use serde::Serialize;
use std::fmt;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViolationKind {
    /// `kills` differs from `k1 + 2*k2 + 3*k3 + 4*k4 + 5*k5`.
    KillCountMismatch { kills: i64, multikill_kills: i64 },
    /// Both `ct_win` and `t_win` are set.
    BothSidesWon,
    /// `team_win` says one thing, the side flags another.
    WinnerFlagsDisagree {
        team_win: TeamSlot,
        ct_win: bool,
        t_win: bool,
    },
    /// Bomb win type without the matching bomb flag.
    BombFlagMissing { win_type: WinType },
    /// More maps than the map mode allows, or a finished Bo1 without exactly one.
    MapCount { map_mode: MapMode, maps: i64 },
    /// Integer outside the documented set for an enum column.
    UndocumentedEnumValue { column: &'static str, value: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractViolation {
    pub table: &'static str,
    pub id: i64,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}: ", self.table, self.id)?;
        match &self.kind {
            ViolationKind::KillCountMismatch {
                kills,
                multikill_kills,
            } => write!(
                f,
                "kills = {} but multi-kill counters add up to {}",
                kills, multikill_kills
            ),
            ViolationKind::BothSidesWon => write!(f, "both ct_win and t_win are set"),
            ViolationKind::WinnerFlagsDisagree {
                team_win,
                ct_win,
                t_win,
            } => write!(
                f,
                "team_win = {} disagrees with ct_win = {}, t_win = {}",
                team_win, ct_win, t_win
            ),
            ViolationKind::BombFlagMissing { win_type } => {
                write!(f, "win type '{}' without the matching bomb flag", win_type)
            }
            ViolationKind::MapCount { map_mode, maps } => {
                write!(f, "{} match has {} map(s)", map_mode, maps)
            }
            ViolationKind::UndocumentedEnumValue { column, value } => {
                write!(f, "{} holds undocumented value {}", column, value)
            }
        }
    }
}

/// Kill total against the multi-kill counters.
pub fn check_stat_line(stats: &StatLine) -> Option<ViolationKind> {
    let multikill_kills = stats.multikill_kills();
    if stats.kills as i64 != multikill_kills {
        Some(ViolationKind::KillCountMismatch {
            kills: stats.kills as i64,
            multikill_kills,
        })
    } else {
        None
    }
}

/// Consistency of the redundant round outcome columns.
pub fn check_round(
    win_type: WinType,
    team_win: TeamSlot,
    ct_win: bool,
    t_win: bool,
    bomb_defused: bool,
    bomb_exploded: bool,
) -> Vec<ViolationKind> {
    let mut found = Vec::new();

    if ct_win && t_win {
        found.push(ViolationKind::BothSidesWon);
    } else if (team_win == TeamSlot::Other) != (!ct_win && !t_win) {
        found.push(ViolationKind::WinnerFlagsDisagree {
            team_win,
            ct_win,
            t_win,
        });
    }

    let bomb_flag_missing = match win_type {
        WinType::Defused => !bomb_defused,
        WinType::Exploded => !bomb_exploded,
        WinType::Normal | WinType::Saved => false,
    };
    if bomb_flag_missing {
        found.push(ViolationKind::BombFlagMissing { win_type });
    }

    found
}

/// Number of maps recorded for a match against its map mode.
pub fn check_map_count(map_mode: MapMode, status: MatchStatus, maps: i64) -> Option<ViolationKind> {
    let too_many = maps > map_mode.max_maps() as i64;
    let incomplete_bo1 = map_mode == MapMode::Bo1 && status == MatchStatus::Complete && maps != 1;
    if too_many || incomplete_bo1 {
        Some(ViolationKind::MapCount { map_mode, maps })
    } else {
        None
    }
}

// (table, column, documented codes)
const ENUM_COLUMNS: &[(&str, &str, fn(i64) -> bool)] = &[
    ("matches", "status", |c| MatchStatus::from_code(c).is_ok()),
    ("matches", "ruleset", |c| Ruleset::from_code(c).is_ok()),
    ("matches", "map_mode", |c| MapMode::from_code(c).is_ok()),
    ("match_map_scores", "score_type", |c| ScoreType::from_code(c).is_ok()),
    ("rounds", "win_type", |c| WinType::from_code(c).is_ok()),
    ("rounds", "team_win", |c| TeamSlot::from_code(c).is_ok()),
    ("player_kills", "killer_team", |c| Side::from_code(c).is_ok()),
    ("player_kills", "victim_team", |c| Side::from_code(c).is_ok()),
    ("player_rounds", "first_side", |c| Side::from_code(c).is_ok()),
    ("player_rounds", "current_side", |c| Side::from_code(c).is_ok()),
    ("player_matches", "team", |c| TeamSlot::from_code(c).is_ok()),
    ("player_matches", "first_side", |c| Side::from_code(c).is_ok()),
    ("player_matches", "current_side", |c| Side::from_code(c).is_ok()),
];

const STAT_TABLES: &[&str] = &["player_rounds", "player_matches", "player_seasons"];

impl LeagueDatabase {
    /// Run every producer contract check and return what fails.
    ///
    /// Fails with [`LeagueError::SchemaNotMigrated`] on an empty schema.
    pub fn audit(&self) -> Result<Vec<ContractViolation>> {
        if self.current_version()? == 0 {
            return Err(LeagueError::SchemaNotMigrated);
        }

        let mut violations = Vec::new();
        self.audit_enum_columns(&mut violations)?;
        for table in STAT_TABLES {
            self.audit_stat_lines(table, &mut violations)?;
        }
        self.audit_rounds(&mut violations)?;
        self.audit_map_counts(&mut violations)?;

        info!(violations = violations.len(), "Contract audit finished");
        Ok(violations)
    }

    fn audit_enum_columns(&self, out: &mut Vec<ContractViolation>) -> Result<()> {
        for &(table, column, documented) in ENUM_COLUMNS {
            let mut stmt = self
                .conn
                .prepare(&format!("SELECT id, {} FROM {} ORDER BY id", column, table))?;
            let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?;
            for row in rows {
                let (id, value) = row?;
                if !documented(value) {
                    out.push(ContractViolation {
                        table,
                        id,
                        kind: ViolationKind::UndocumentedEnumValue { column, value },
                    });
                }
            }
        }
        Ok(())
    }

    fn audit_stat_lines(&self, table: &'static str, out: &mut Vec<ContractViolation>) -> Result<()> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT id, kills, k1, k2, k3, k4, k5 FROM {} ORDER BY id",
            table
        ))?;
        let rows = stmt.query_map([], |row| {
            let stats = StatLine {
                kills: row.get(1)?,
                k1: row.get(2)?,
                k2: row.get(3)?,
                k3: row.get(4)?,
                k4: row.get(5)?,
                k5: row.get(6)?,
                ..Default::default()
            };
            Ok((row.get::<_, i64>(0)?, stats))
        })?;

        for row in rows {
            let (id, stats) = row?;
            if let Some(kind) = check_stat_line(&stats) {
                out.push(ContractViolation { table, id, kind });
            }
        }
        Ok(())
    }

    fn audit_rounds(&self, out: &mut Vec<ContractViolation>) -> Result<()> {
        let mut stmt = self.conn.prepare(
            "SELECT id, win_type, team_win, ct_win, t_win, bomb_defused, bomb_exploded
             FROM rounds ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, bool>(3)?,
                row.get::<_, bool>(4)?,
                row.get::<_, bool>(5)?,
                row.get::<_, bool>(6)?,
            ))
        })?;

        for row in rows {
            let (id, win_type, team_win, ct_win, t_win, defused, exploded) = row?;
            // Undocumented codes are already reported by the enum check
            let (Ok(win_type), Ok(team_win)) =
                (WinType::from_code(win_type), TeamSlot::from_code(team_win))
            else {
                continue;
            };
            for kind in check_round(win_type, team_win, ct_win, t_win, defused, exploded) {
                out.push(ContractViolation {
                    table: "rounds",
                    id,
                    kind,
                });
            }
        }
        Ok(())
    }

    fn audit_map_counts(&self, out: &mut Vec<ContractViolation>) -> Result<()> {
        let mut stmt = self.conn.prepare(
            "SELECT m.id, m.map_mode, m.status, COUNT(mm.id)
             FROM matches m LEFT JOIN match_maps mm ON mm.match_id = m.id
             GROUP BY m.id ORDER BY m.id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, i64>(3)?,
            ))
        })?;

        for row in rows {
            let (id, map_mode, status, maps) = row?;
            let (Ok(map_mode), Ok(status)) =
                (MapMode::from_code(map_mode), MatchStatus::from_code(status))
            else {
                continue;
            };
            if let Some(kind) = check_map_count(map_mode, status, maps) {
                out.push(ContractViolation {
                    table: "matches",
                    id,
                    kind,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_line_weighted_kill_sum() {
        let mut stats = StatLine::default();
        stats.add_round_kills(3);
        stats.add_round_kills(1);
        stats.add_round_kills(0);
        assert_eq!(stats.kills, 4);
        assert_eq!(check_stat_line(&stats), None);

        stats.kills = 5;
        assert_eq!(
            check_stat_line(&stats),
            Some(ViolationKind::KillCountMismatch {
                kills: 5,
                multikill_kills: 4
            })
        );
    }

    #[test]
    fn test_round_winner_consistency() {
        assert!(check_round(WinType::Normal, TeamSlot::A, true, false, false, false).is_empty());
        assert!(check_round(WinType::Normal, TeamSlot::Other, false, false, false, false).is_empty());
        assert_eq!(
            check_round(WinType::Normal, TeamSlot::A, true, true, false, false),
            vec![ViolationKind::BothSidesWon]
        );
        assert_eq!(
            check_round(WinType::Normal, TeamSlot::Other, false, true, false, false),
            vec![ViolationKind::WinnerFlagsDisagree {
                team_win: TeamSlot::Other,
                ct_win: false,
                t_win: true
            }]
        );
        assert_eq!(
            check_round(WinType::Normal, TeamSlot::B, false, false, false, false).len(),
            1
        );
    }

    #[test]
    fn test_round_bomb_flags() {
        assert!(check_round(WinType::Defused, TeamSlot::A, true, false, true, false).is_empty());
        assert_eq!(
            check_round(WinType::Exploded, TeamSlot::B, false, true, false, false),
            vec![ViolationKind::BombFlagMissing {
                win_type: WinType::Exploded
            }]
        );
        assert!(check_round(WinType::Saved, TeamSlot::A, true, false, false, false).is_empty());
    }

    #[test]
    fn test_map_count() {
        assert_eq!(check_map_count(MapMode::Bo1, MatchStatus::Complete, 1), None);
        assert_eq!(check_map_count(MapMode::Bo1, MatchStatus::Live, 0), None);
        assert!(check_map_count(MapMode::Bo1, MatchStatus::Complete, 0).is_some());
        assert!(check_map_count(MapMode::Bo1, MatchStatus::Live, 2).is_some());
        assert_eq!(check_map_count(MapMode::Bo3, MatchStatus::Complete, 2), None);
        assert!(check_map_count(MapMode::Bo2, MatchStatus::Complete, 3).is_some());
    }

    #[test]
    fn test_violation_display() {
        let violation = ContractViolation {
            table: "rounds",
            id: 12,
            kind: ViolationKind::BothSidesWon,
        };
        assert_eq!(violation.to_string(), "rounds #12: both ct_win and t_win are set");
    }
}
