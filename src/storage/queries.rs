//! Basic database query operations

use super::{models::*, schema::LeagueDatabase, tables::TableRow};
use crate::error::Result;
use crate::types::*;
use rusqlite::{params, types::ToSql, OptionalExtension};
use tracing::debug;

fn column_list(columns: &[&str]) -> String {
    columns
        .iter()
        .map(|c| format!("\"{}\"", c))
        .collect::<Vec<_>>()
        .join(", ")
}

fn select_sql<T: TableRow>(filter: &str) -> String {
    format!(
        "SELECT id, {} FROM {} {}",
        column_list(T::COLUMNS),
        T::TABLE,
        filter
    )
}

impl LeagueDatabase {
    /// Insert a row into its table and return the new key.
    pub fn insert<T: TableRow>(&mut self, row: &T) -> Result<T::Id> {
        let values = row.values();
        debug_assert_eq!(values.len(), T::COLUMNS.len());

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            T::TABLE,
            column_list(T::COLUMNS),
            vec!["?"; T::COLUMNS.len()].join(", ")
        );
        self.conn.execute(&sql, values.as_slice())?;

        let id = self.conn.last_insert_rowid();
        debug!(table = T::TABLE, id, "Inserted row");
        Ok(T::Id::from(id))
    }

    /// Load a row by key.
    pub fn get<T: TableRow>(&self, id: T::Id) -> Result<Option<T>> {
        let row = self
            .conn
            .query_row(&select_sql::<T>("WHERE id = ?"), [id], |row| T::from_row(row))
            .optional()?;
        Ok(row)
    }

    /// Rows matching a `WHERE` clause fragment, in key order.
    pub(crate) fn list_where<T: TableRow>(
        &self,
        filter: &str,
        values: &[&dyn ToSql],
    ) -> Result<Vec<Record<T::Id, T>>> {
        let sql = select_sql::<T>(&format!("WHERE {} ORDER BY id", filter));
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(values, |row| {
            Ok(Record {
                id: row.get("id")?,
                row: T::from_row(row)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Every row of a table, in key order.
    pub fn list_all<T: TableRow>(&self) -> Result<Vec<Record<T::Id, T>>> {
        self.list_where::<T>("1 = 1", &[])
    }

    /// Number of rows in a table.
    pub fn count<T: TableRow>(&self) -> Result<i64> {
        let count = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", T::TABLE),
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn delete_by_id(&mut self, table: &str, id: i64) -> Result<bool> {
        let rows = self
            .conn
            .execute(&format!("DELETE FROM {} WHERE id = ?", table), [id])?;
        Ok(rows > 0)
    }

    // Seasons and teams

    pub fn active_seasons(&self) -> Result<Vec<Record<SeasonId, Season>>> {
        self.list_where::<Season>("is_active = 1", &[])
    }

    /// Register a team for a season.
    pub fn enroll_team(&mut self, team_id: TeamId, season_id: SeasonId) -> Result<TeamSeasonId> {
        self.insert(&TeamSeason { team_id, season_id })
    }

    pub fn teams_in_season(&self, season_id: SeasonId) -> Result<Vec<Record<TeamId, Team>>> {
        self.list_where::<Team>(
            "id IN (SELECT team_id FROM team_seasons WHERE season_id = ?)",
            &[&season_id],
        )
    }

    /// Delete a season. Fails with a foreign key violation while matches,
    /// enrolments or aggregates still reference it.
    pub fn delete_season(&mut self, id: SeasonId) -> Result<bool> {
        self.delete_by_id(Season::TABLE, id.as_i64())
    }

    // Servers

    pub fn find_server(&self, ip: &str, port: u16) -> Result<Option<Record<ServerId, Server>>> {
        Ok(self
            .list_where::<Server>("ip = ? AND port = ?", &[&ip, &port])?
            .into_iter()
            .next())
    }

    // Matches

    pub fn matches_in_season(&self, season_id: SeasonId) -> Result<Vec<Record<MatchId, Match>>> {
        self.list_where::<Match>("season_id = ?", &[&season_id])
    }

    pub fn matches_with_status(
        &self,
        status: MatchStatus,
    ) -> Result<Vec<Record<MatchId, Match>>> {
        self.list_where::<Match>("status = ?", &[&status])
    }

    /// Update the live state of a match. Returns false when no such match exists.
    pub fn update_match_state(
        &mut self,
        id: MatchId,
        status: MatchStatus,
        score_a: i32,
        score_b: i32,
        current_map: i32,
    ) -> Result<bool> {
        let rows = self.conn.execute(
            "UPDATE matches SET status = ?, score_a = ?, score_b = ?, current_map = ?
             WHERE id = ?",
            params![status, score_a, score_b, current_map, id],
        )?;
        Ok(rows > 0)
    }

    pub fn set_match_paused(&mut self, id: MatchId, paused: bool) -> Result<bool> {
        let rows = self.conn.execute(
            "UPDATE matches SET paused = ? WHERE id = ?",
            params![paused, id],
        )?;
        Ok(rows > 0)
    }

    /// Delete a match. Restricted while maps or stats reference it.
    pub fn delete_match(&mut self, id: MatchId) -> Result<bool> {
        self.delete_by_id(Match::TABLE, id.as_i64())
    }

    // Maps, scores and rounds

    pub fn maps_in_match(&self, match_id: MatchId) -> Result<Vec<Record<MatchMapId, MatchMap>>> {
        self.list_where::<MatchMap>("match_id = ?", &[&match_id])
    }

    /// Look a map up by the SHA-1 of its demo archive.
    pub fn find_match_map_by_sha1(
        &self,
        sha1sum: &str,
    ) -> Result<Option<Record<MatchMapId, MatchMap>>> {
        Ok(self
            .list_where::<MatchMap>("sha1sum = ?", &[&sha1sum])?
            .into_iter()
            .next())
    }

    pub fn scores_for_map(
        &self,
        match_map_id: MatchMapId,
    ) -> Result<Vec<Record<MatchMapScoreId, MatchMapScore>>> {
        self.list_where::<MatchMapScore>("match_map_id = ?", &[&match_map_id])
    }

    /// Rounds of a map ordered by round number.
    pub fn rounds_in_map(&self, match_map_id: MatchMapId) -> Result<Vec<Record<RoundId, Round>>> {
        let mut rounds = self.list_where::<Round>("match_map_id = ?", &[&match_map_id])?;
        rounds.sort_by_key(|r| (r.row.round_number, r.id));
        Ok(rounds)
    }

    pub fn kills_in_round(&self, round_id: RoundId) -> Result<Vec<Record<PlayerKillId, PlayerKill>>> {
        self.list_where::<PlayerKill>("round_id = ?", &[&round_id])
    }

    pub fn player_rounds_in_round(
        &self,
        round_id: RoundId,
    ) -> Result<Vec<Record<PlayerRoundId, PlayerRound>>> {
        self.list_where::<PlayerRound>("round_id = ?", &[&round_id])
    }

    // Players

    pub fn find_player_by_steamid(&self, steamid: i64) -> Result<Option<Record<PlayerId, Player>>> {
        Ok(self
            .list_where::<Player>("steamid = ?", &[&steamid])?
            .into_iter()
            .next())
    }

    pub fn set_player_banned(&mut self, id: PlayerId, banned: bool) -> Result<bool> {
        let rows = self.conn.execute(
            "UPDATE players SET is_banned = ? WHERE id = ?",
            params![banned, id],
        )?;
        Ok(rows > 0)
    }

    /// Store a new rating estimate computed by the external rating job.
    pub fn set_player_rating(&mut self, id: PlayerId, rating: f64, variance: f64) -> Result<bool> {
        let rows = self.conn.execute(
            "UPDATE players SET rating = ?, rating_variance = ? WHERE id = ?",
            params![rating, variance, id],
        )?;
        Ok(rows > 0)
    }

    /// Delete a player. Restricted while any stat, kill, ban or ip row references them.
    pub fn delete_player(&mut self, id: PlayerId) -> Result<bool> {
        self.delete_by_id(Player::TABLE, id.as_i64())
    }

    pub fn bans_for_player(&self, player_id: PlayerId) -> Result<Vec<Record<PlayerBanId, PlayerBan>>> {
        self.list_where::<PlayerBan>("player_id = ?", &[&player_id])
    }

    pub fn ips_for_player(&self, player_id: PlayerId) -> Result<Vec<Record<PlayerIpId, PlayerIp>>> {
        self.list_where::<PlayerIp>("player_id = ?", &[&player_id])
    }

    /// Remember an address for a player. Returns false when the pair was
    /// already recorded.
    pub fn record_player_ip(&mut self, player_id: PlayerId, ip: &str) -> Result<bool> {
        let rows = self.conn.execute(
            "INSERT OR IGNORE INTO player_ips (player_id, ip) VALUES (?, ?)",
            params![player_id, ip],
        )?;
        if rows > 0 {
            debug!(%player_id, ip, "Recorded new player ip");
        }
        Ok(rows > 0)
    }

    /// Players that have been seen from `ip`.
    pub fn players_seen_from(&self, ip: &str) -> Result<Vec<Record<PlayerId, Player>>> {
        self.list_where::<Player>(
            "id IN (SELECT player_id FROM player_ips WHERE ip = ?)",
            &[&ip],
        )
    }

    // Authorization junctions

    pub fn add_player_group(&mut self, player_id: PlayerId, group_id: i64) -> Result<()> {
        self.conn.execute(
            "INSERT INTO player_groups (player_id, group_id) VALUES (?, ?)",
            params![player_id, group_id],
        )?;
        Ok(())
    }

    pub fn player_groups(&self, player_id: PlayerId) -> Result<Vec<i64>> {
        self.junction_ids("player_groups", "group_id", player_id)
    }

    pub fn add_player_permission(&mut self, player_id: PlayerId, permission_id: i64) -> Result<()> {
        self.conn.execute(
            "INSERT INTO player_user_permissions (player_id, permission_id) VALUES (?, ?)",
            params![player_id, permission_id],
        )?;
        Ok(())
    }

    pub fn player_permissions(&self, player_id: PlayerId) -> Result<Vec<i64>> {
        self.junction_ids("player_user_permissions", "permission_id", player_id)
    }

    fn junction_ids(&self, table: &str, column: &str, player_id: PlayerId) -> Result<Vec<i64>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM {} WHERE player_id = ? ORDER BY {}",
            column, table, column
        ))?;
        let rows = stmt.query_map([player_id], |row| row.get(0))?;

        let mut ids = Vec::new();
        for row in rows {
            ids.push(row?);
        }
        Ok(ids)
    }

    // Per-match stats

    pub fn player_matches_in_match(
        &self,
        match_id: MatchId,
    ) -> Result<Vec<Record<PlayerMatchId, PlayerMatch>>> {
        self.list_where::<PlayerMatch>("match_id = ?", &[&match_id])
    }

    pub fn player_match_weapons(
        &self,
        match_id: MatchId,
        player_id: PlayerId,
    ) -> Result<Vec<Record<PlayerMatchWeaponsId, PlayerMatchWeapons>>> {
        self.list_where::<PlayerMatchWeapons>(
            "match_id = ? AND player_id = ?",
            &[&match_id, &player_id],
        )
    }

    // Per-season aggregates

    pub fn player_season(
        &self,
        player_id: PlayerId,
        season_id: SeasonId,
    ) -> Result<Option<Record<PlayerSeasonId, PlayerSeason>>> {
        Ok(self
            .list_where::<PlayerSeason>("player_id = ? AND season_id = ?", &[&player_id, &season_id])?
            .into_iter()
            .next())
    }

    pub fn season_leaderboard(
        &self,
        season_id: SeasonId,
    ) -> Result<Vec<Record<PlayerSeasonId, PlayerSeason>>> {
        let mut rows = self.list_where::<PlayerSeason>("season_id = ?", &[&season_id])?;
        rows.sort_by(|a, b| b.row.rws.total_cmp(&a.row.rws));
        Ok(rows)
    }

    pub fn player_season_weapons(
        &self,
        player_id: PlayerId,
        season_id: SeasonId,
    ) -> Result<Vec<Record<PlayerSeasonWeaponsId, PlayerSeasonWeapons>>> {
        self.list_where::<PlayerSeasonWeapons>(
            "player_id = ? AND season_id = ?",
            &[&player_id, &season_id],
        )
    }

    /// Replace a player's aggregate line for a season in one transaction.
    pub fn replace_player_season(&mut self, stats: &PlayerSeason) -> Result<PlayerSeasonId> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM player_seasons WHERE player_id = ? AND season_id = ?",
            params![stats.player_id, stats.season_id],
        )?;
        let values = stats.values();
        tx.execute(
            &format!(
                "INSERT INTO player_seasons ({}) VALUES ({})",
                column_list(PlayerSeason::COLUMNS),
                vec!["?"; PlayerSeason::COLUMNS.len()].join(", ")
            ),
            values.as_slice(),
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(PlayerSeasonId::new(id))
    }

    /// Replace a player's per-weapon aggregates for a season in one transaction.
    pub fn replace_player_season_weapons(
        &mut self,
        player_id: PlayerId,
        season_id: SeasonId,
        weapons: &[WeaponStats],
    ) -> Result<usize> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM player_season_weapons WHERE player_id = ? AND season_id = ?",
            params![player_id, season_id],
        )?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO player_season_weapons ({}) VALUES ({})",
                column_list(PlayerSeasonWeapons::COLUMNS),
                vec!["?"; PlayerSeasonWeapons::COLUMNS.len()].join(", ")
            ))?;
            for weapon in weapons {
                let row = PlayerSeasonWeapons {
                    player_id,
                    season_id,
                    stats: weapon.clone(),
                };
                stmt.execute(row.values().as_slice())?;
            }
        }
        tx.commit()?;
        debug!(%player_id, %season_id, count = weapons.len(), "Replaced season weapon stats");
        Ok(weapons.len())
    }
}
