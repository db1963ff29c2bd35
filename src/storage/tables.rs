//! Column mappings between models and tables
//!
//! [`TableRow`] ties each model to its table, its key type and its column
//! list, so the generic queries in `queries.rs` can insert and load any
//! entity. `COLUMNS` and `values()` must list columns in the same order.

use super::models::*;
use crate::types::*;
use rusqlite::types::{FromSql, ToSql};
use rusqlite::Row;

pub trait TableRow: Sized {
    type Id: Copy + ToSql + FromSql + From<i64>;

    const TABLE: &'static str;
    /// Every column except `id`.
    const COLUMNS: &'static [&'static str];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    fn values(&self) -> Vec<&dyn ToSql>;
}

impl StatLine {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            kills: row.get("kills")?,
            assists: row.get("assists")?,
            deaths: row.get("deaths")?,
            defuses: row.get("defuses")?,
            plants: row.get("plants")?,
            tks: row.get("tks")?,
            clutch_v1: row.get("clutch_v1")?,
            clutch_v2: row.get("clutch_v2")?,
            clutch_v3: row.get("clutch_v3")?,
            clutch_v4: row.get("clutch_v4")?,
            clutch_v5: row.get("clutch_v5")?,
            k1: row.get("k1")?,
            k2: row.get("k2")?,
            k3: row.get("k3")?,
            k4: row.get("k4")?,
            k5: row.get("k5")?,
        })
    }

    fn values(&self) -> [&dyn ToSql; 16] {
        [
            &self.kills,
            &self.assists,
            &self.deaths,
            &self.defuses,
            &self.plants,
            &self.tks,
            &self.clutch_v1,
            &self.clutch_v2,
            &self.clutch_v3,
            &self.clutch_v4,
            &self.clutch_v5,
            &self.k1,
            &self.k2,
            &self.k3,
            &self.k4,
            &self.k5,
        ]
    }
}

impl WeaponStats {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            weapon: row.get("weapon")?,
            headshots: row.get("headshots")?,
            hits: row.get("hits")?,
            damage: row.get("damage")?,
            kills: row.get("kills")?,
            deaths: row.get("deaths")?,
        })
    }

    fn values(&self) -> [&dyn ToSql; 6] {
        [
            &self.weapon,
            &self.headshots,
            &self.hits,
            &self.damage,
            &self.kills,
            &self.deaths,
        ]
    }
}

impl TableRow for Season {
    type Id = SeasonId;
    const TABLE: &'static str = "seasons";
    const COLUMNS: &'static [&'static str] =
        &["name", "event", "start", "end", "link", "logo", "is_active"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get("name")?,
            event: row.get("event")?,
            start: row.get("start")?,
            end: row.get("end")?,
            link: row.get("link")?,
            logo: row.get("logo")?,
            is_active: row.get("is_active")?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.name,
            &self.event,
            &self.start,
            &self.end,
            &self.link,
            &self.logo,
            &self.is_active,
        ]
    }
}

impl TableRow for Team {
    type Id = TeamId;
    const TABLE: &'static str = "teams";
    const COLUMNS: &'static [&'static str] = &["name", "shorthandle", "link"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get("name")?,
            shorthandle: row.get("shorthandle")?,
            link: row.get("link")?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![&self.name, &self.shorthandle, &self.link]
    }
}

impl TableRow for TeamSeason {
    type Id = TeamSeasonId;
    const TABLE: &'static str = "team_seasons";
    const COLUMNS: &'static [&'static str] = &["team_id", "season_id"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            team_id: row.get("team_id")?,
            season_id: row.get("season_id")?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![&self.team_id, &self.season_id]
    }
}

impl TableRow for Server {
    type Id = ServerId;
    const TABLE: &'static str = "servers";
    const COLUMNS: &'static [&'static str] = &["name", "ip", "port", "gotv_ip", "gotv_port", "rcon"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get("name")?,
            ip: row.get("ip")?,
            port: row.get("port")?,
            gotv_ip: row.get("gotv_ip")?,
            gotv_port: row.get("gotv_port")?,
            rcon: row.get("rcon")?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.name,
            &self.ip,
            &self.port,
            &self.gotv_ip,
            &self.gotv_port,
            &self.rcon,
        ]
    }
}

impl TableRow for Match {
    type Id = MatchId;
    const TABLE: &'static str = "matches";
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "server_id",
        "season_id",
        "team_a_id",
        "team_b_id",
        "status",
        "paused",
        "score_a",
        "score_b",
        "ruleset",
        "config_ot",
        "config_knife_round",
        "config_password",
        "map_mode",
        "current_map",
        "start_time",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get("name")?,
            server_id: row.get("server_id")?,
            season_id: row.get("season_id")?,
            team_a_id: row.get("team_a_id")?,
            team_b_id: row.get("team_b_id")?,
            status: row.get("status")?,
            paused: row.get("paused")?,
            score_a: row.get("score_a")?,
            score_b: row.get("score_b")?,
            ruleset: row.get("ruleset")?,
            config_ot: row.get("config_ot")?,
            config_knife_round: row.get("config_knife_round")?,
            config_password: row.get("config_password")?,
            map_mode: row.get("map_mode")?,
            current_map: row.get("current_map")?,
            start_time: row.get("start_time")?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.name,
            &self.server_id,
            &self.season_id,
            &self.team_a_id,
            &self.team_b_id,
            &self.status,
            &self.paused,
            &self.score_a,
            &self.score_b,
            &self.ruleset,
            &self.config_ot,
            &self.config_knife_round,
            &self.config_password,
            &self.map_mode,
            &self.current_map,
            &self.start_time,
        ]
    }
}

impl TableRow for MatchMap {
    type Id = MatchMapId;
    const TABLE: &'static str = "match_maps";
    const COLUMNS: &'static [&'static str] = &[
        "match_id",
        "map_name",
        "score_1",
        "score_2",
        "current_period",
        "zip_url",
        "sha1sum",
        "has_demo",
        "start_time",
        "end_time",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            match_id: row.get("match_id")?,
            map_name: row.get("map_name")?,
            score_1: row.get("score_1")?,
            score_2: row.get("score_2")?,
            current_period: row.get("current_period")?,
            zip_url: row.get("zip_url")?,
            sha1sum: row.get("sha1sum")?,
            has_demo: row.get("has_demo")?,
            start_time: row.get("start_time")?,
            end_time: row.get("end_time")?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.match_id,
            &self.map_name,
            &self.score_1,
            &self.score_2,
            &self.current_period,
            &self.zip_url,
            &self.sha1sum,
            &self.has_demo,
            &self.start_time,
            &self.end_time,
        ]
    }
}

impl TableRow for MatchMapScore {
    type Id = MatchMapScoreId;
    const TABLE: &'static str = "match_map_scores";
    const COLUMNS: &'static [&'static str] = &[
        "match_map_id",
        "score_type",
        "score1_half1",
        "score1_half2",
        "score2_half1",
        "score2_half2",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            match_map_id: row.get("match_map_id")?,
            score_type: row.get("score_type")?,
            score1_half1: row.get("score1_half1")?,
            score1_half2: row.get("score1_half2")?,
            score2_half1: row.get("score2_half1")?,
            score2_half2: row.get("score2_half2")?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.match_map_id,
            &self.score_type,
            &self.score1_half1,
            &self.score1_half2,
            &self.score2_half1,
            &self.score2_half2,
        ]
    }
}

impl TableRow for Round {
    type Id = RoundId;
    const TABLE: &'static str = "rounds";
    const COLUMNS: &'static [&'static str] = &[
        "match_id",
        "match_map_id",
        "round_number",
        "bomb_planted",
        "bomb_defused",
        "bomb_exploded",
        "win_type",
        "team_win",
        "ct_win",
        "t_win",
        "score_a",
        "score_b",
        "backup_file_name",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            match_id: row.get("match_id")?,
            match_map_id: row.get("match_map_id")?,
            round_number: row.get("round_number")?,
            bomb_planted: row.get("bomb_planted")?,
            bomb_defused: row.get("bomb_defused")?,
            bomb_exploded: row.get("bomb_exploded")?,
            win_type: row.get("win_type")?,
            team_win: row.get("team_win")?,
            ct_win: row.get("ct_win")?,
            t_win: row.get("t_win")?,
            score_a: row.get("score_a")?,
            score_b: row.get("score_b")?,
            backup_file_name: row.get("backup_file_name")?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.match_id,
            &self.match_map_id,
            &self.round_number,
            &self.bomb_planted,
            &self.bomb_defused,
            &self.bomb_exploded,
            &self.win_type,
            &self.team_win,
            &self.ct_win,
            &self.t_win,
            &self.score_a,
            &self.score_b,
            &self.backup_file_name,
        ]
    }
}

impl TableRow for Player {
    type Id = PlayerId;
    const TABLE: &'static str = "players";
    const COLUMNS: &'static [&'static str] = &[
        "password",
        "last_login",
        "is_superuser",
        "username",
        "email",
        "is_staff",
        "is_active",
        "date_joined",
        "steamid",
        "profileurl",
        "avatar",
        "avatarmedium",
        "avatarfull",
        "is_banned",
        "reputation",
        "rating",
        "rating_variance",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            password: row.get("password")?,
            last_login: row.get("last_login")?,
            is_superuser: row.get("is_superuser")?,
            username: row.get("username")?,
            email: row.get("email")?,
            is_staff: row.get("is_staff")?,
            is_active: row.get("is_active")?,
            date_joined: row.get("date_joined")?,
            steamid: row.get("steamid")?,
            profileurl: row.get("profileurl")?,
            avatar: row.get("avatar")?,
            avatarmedium: row.get("avatarmedium")?,
            avatarfull: row.get("avatarfull")?,
            is_banned: row.get("is_banned")?,
            reputation: row.get("reputation")?,
            rating: row.get("rating")?,
            rating_variance: row.get("rating_variance")?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.password,
            &self.last_login,
            &self.is_superuser,
            &self.username,
            &self.email,
            &self.is_staff,
            &self.is_active,
            &self.date_joined,
            &self.steamid,
            &self.profileurl,
            &self.avatar,
            &self.avatarmedium,
            &self.avatarfull,
            &self.is_banned,
            &self.reputation,
            &self.rating,
            &self.rating_variance,
        ]
    }
}

impl TableRow for PlayerBan {
    type Id = PlayerBanId;
    const TABLE: &'static str = "player_bans";
    const COLUMNS: &'static [&'static str] = &["player_id", "start", "end", "reason", "link"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            player_id: row.get("player_id")?,
            start: row.get("start")?,
            end: row.get("end")?,
            reason: row.get("reason")?,
            link: row.get("link")?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.player_id,
            &self.start,
            &self.end,
            &self.reason,
            &self.link,
        ]
    }
}

impl TableRow for PlayerIp {
    type Id = PlayerIpId;
    const TABLE: &'static str = "player_ips";
    const COLUMNS: &'static [&'static str] = &["player_id", "ip"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            player_id: row.get("player_id")?,
            ip: row.get("ip")?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![&self.player_id, &self.ip]
    }
}

impl TableRow for PlayerKill {
    type Id = PlayerKillId;
    const TABLE: &'static str = "player_kills";
    const COLUMNS: &'static [&'static str] = &[
        "match_id",
        "match_map_id",
        "round_id",
        "killer_id",
        "killer_team",
        "victim_id",
        "victim_team",
        "weapon",
        "headshot",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            match_id: row.get("match_id")?,
            match_map_id: row.get("match_map_id")?,
            round_id: row.get("round_id")?,
            killer_id: row.get("killer_id")?,
            killer_team: row.get("killer_team")?,
            victim_id: row.get("victim_id")?,
            victim_team: row.get("victim_team")?,
            weapon: row.get("weapon")?,
            headshot: row.get("headshot")?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.match_id,
            &self.match_map_id,
            &self.round_id,
            &self.killer_id,
            &self.killer_team,
            &self.victim_id,
            &self.victim_team,
            &self.weapon,
            &self.headshot,
        ]
    }
}

impl TableRow for PlayerRound {
    type Id = PlayerRoundId;
    const TABLE: &'static str = "player_rounds";
    const COLUMNS: &'static [&'static str] = &[
        "round_id",
        "player_id",
        "first_side",
        "current_side",
        "kills",
        "assists",
        "deaths",
        "defuses",
        "plants",
        "tks",
        "clutch_v1",
        "clutch_v2",
        "clutch_v3",
        "clutch_v4",
        "clutch_v5",
        "k1",
        "k2",
        "k3",
        "k4",
        "k5",
        "damage",
        "rws",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            round_id: row.get("round_id")?,
            player_id: row.get("player_id")?,
            first_side: row.get("first_side")?,
            current_side: row.get("current_side")?,
            stats: StatLine::read(row)?,
            damage: row.get("damage")?,
            rws: row.get("rws")?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        let mut values: Vec<&dyn ToSql> = vec![
            &self.round_id,
            &self.player_id,
            &self.first_side,
            &self.current_side,
        ];
        values.extend(self.stats.values());
        values.extend([&self.damage as &dyn ToSql, &self.rws]);
        values
    }
}

impl TableRow for PlayerMatch {
    type Id = PlayerMatchId;
    const TABLE: &'static str = "player_matches";
    const COLUMNS: &'static [&'static str] = &[
        "match_id",
        "match_map_id",
        "player_id",
        "team",
        "first_side",
        "current_side",
        "nickname",
        "kills",
        "assists",
        "deaths",
        "defuses",
        "plants",
        "tks",
        "clutch_v1",
        "clutch_v2",
        "clutch_v3",
        "clutch_v4",
        "clutch_v5",
        "k1",
        "k2",
        "k3",
        "k4",
        "k5",
        "score",
        "hsp",
        "adr",
        "rws",
        "rounds_won",
        "rounds_lost",
        "rounds_tied",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            match_id: row.get("match_id")?,
            match_map_id: row.get("match_map_id")?,
            player_id: row.get("player_id")?,
            team: row.get("team")?,
            first_side: row.get("first_side")?,
            current_side: row.get("current_side")?,
            nickname: row.get("nickname")?,
            stats: StatLine::read(row)?,
            score: row.get("score")?,
            hsp: row.get("hsp")?,
            adr: row.get("adr")?,
            rws: row.get("rws")?,
            rounds_won: row.get("rounds_won")?,
            rounds_lost: row.get("rounds_lost")?,
            rounds_tied: row.get("rounds_tied")?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        let mut values: Vec<&dyn ToSql> = vec![
            &self.match_id,
            &self.match_map_id,
            &self.player_id,
            &self.team,
            &self.first_side,
            &self.current_side,
            &self.nickname,
        ];
        values.extend(self.stats.values());
        values.extend([
            &self.score as &dyn ToSql,
            &self.hsp,
            &self.adr,
            &self.rws,
            &self.rounds_won,
            &self.rounds_lost,
            &self.rounds_tied,
        ]);
        values
    }
}

impl TableRow for PlayerSeason {
    type Id = PlayerSeasonId;
    const TABLE: &'static str = "player_seasons";
    const COLUMNS: &'static [&'static str] = &[
        "player_id",
        "season_id",
        "kills",
        "assists",
        "deaths",
        "defuses",
        "plants",
        "tks",
        "clutch_v1",
        "clutch_v2",
        "clutch_v3",
        "clutch_v4",
        "clutch_v5",
        "k1",
        "k2",
        "k3",
        "k4",
        "k5",
        "score",
        "hsp",
        "adr",
        "rws",
        "rounds_won",
        "rounds_lost",
        "rounds_tied",
        "matches_won",
        "matches_lost",
        "matches_tied",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            player_id: row.get("player_id")?,
            season_id: row.get("season_id")?,
            stats: StatLine::read(row)?,
            score: row.get("score")?,
            hsp: row.get("hsp")?,
            adr: row.get("adr")?,
            rws: row.get("rws")?,
            rounds_won: row.get("rounds_won")?,
            rounds_lost: row.get("rounds_lost")?,
            rounds_tied: row.get("rounds_tied")?,
            matches_won: row.get("matches_won")?,
            matches_lost: row.get("matches_lost")?,
            matches_tied: row.get("matches_tied")?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        let mut values: Vec<&dyn ToSql> = vec![&self.player_id, &self.season_id];
        values.extend(self.stats.values());
        values.extend([
            &self.score as &dyn ToSql,
            &self.hsp,
            &self.adr,
            &self.rws,
            &self.rounds_won,
            &self.rounds_lost,
            &self.rounds_tied,
            &self.matches_won,
            &self.matches_lost,
            &self.matches_tied,
        ]);
        values
    }
}

impl TableRow for PlayerMatchWeapons {
    type Id = PlayerMatchWeaponsId;
    const TABLE: &'static str = "player_match_weapons";
    const COLUMNS: &'static [&'static str] = &[
        "match_id",
        "match_map_id",
        "player_id",
        "weapon",
        "headshots",
        "hits",
        "damage",
        "kills",
        "deaths",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            match_id: row.get("match_id")?,
            match_map_id: row.get("match_map_id")?,
            player_id: row.get("player_id")?,
            stats: WeaponStats::read(row)?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        let mut values: Vec<&dyn ToSql> = vec![&self.match_id, &self.match_map_id, &self.player_id];
        values.extend(self.stats.values());
        values
    }
}

impl TableRow for PlayerSeasonWeapons {
    type Id = PlayerSeasonWeaponsId;
    const TABLE: &'static str = "player_season_weapons";
    const COLUMNS: &'static [&'static str] = &[
        "player_id",
        "season_id",
        "weapon",
        "headshots",
        "hits",
        "damage",
        "kills",
        "deaths",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            player_id: row.get("player_id")?,
            season_id: row.get("season_id")?,
            stats: WeaponStats::read(row)?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        let mut values: Vec<&dyn ToSql> = vec![&self.player_id, &self.season_id];
        values.extend(self.stats.values());
        values
    }
}
