//! Data models for the storage layer
//!
//! One struct per table, holding the row's columns minus its surrogate key.
//! Foreign keys are typed ids. Constructors fill in the column defaults.

use crate::types::*;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Prior skill rating given to new players.
pub const DEFAULT_RATING: f64 = 25.0;
/// Prior rating uncertainty given to new players.
pub const DEFAULT_RATING_VARIANCE: f64 = 8.333;
/// Default game server port.
pub const DEFAULT_SERVER_PORT: u16 = 27015;
/// Default GOTV broadcast port.
pub const DEFAULT_GOTV_PORT: u16 = 27020;

/// A stored row together with its primary key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<I, T> {
    pub id: I,
    #[serde(flatten)]
    pub row: T,
}

/// A competitive season or event window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub name: String,
    pub event: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub link: String,
    pub logo: String,
    pub is_active: bool,
}

impl Season {
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            name: name.into(),
            event: String::new(),
            start,
            end,
            link: String::new(),
            logo: String::new(),
            is_active: false,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub shorthandle: String,
    pub link: String,
}

impl Team {
    pub fn new(name: impl Into<String>, shorthandle: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shorthandle: shorthandle.into(),
            link: String::new(),
        }
    }
}

/// A team's participation in a season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSeason {
    pub team_id: TeamId,
    pub season_id: SeasonId,
}

/// A game server endpoint. `(ip, port)` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub name: String,
    pub ip: String,
    pub port: u16,
    pub gotv_ip: String,
    pub gotv_port: u16,
    pub rcon: String,
}

impl Server {
    pub fn new(name: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ip: ip.into(),
            port: DEFAULT_SERVER_PORT,
            gotv_ip: String::new(),
            gotv_port: DEFAULT_GOTV_PORT,
            rcon: String::new(),
        }
    }

    /// `ip:port` of the game server.
    pub fn address(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }

    /// `ip:port` of the GOTV relay, when one is configured.
    pub fn gotv_address(&self) -> Option<String> {
        if self.gotv_ip.is_empty() {
            None
        } else {
            Some(format!("{}:{}", self.gotv_ip, self.gotv_port))
        }
    }
}

/// A best-of-N contest between two teams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub name: String,
    pub server_id: ServerId,
    pub season_id: SeasonId,
    pub team_a_id: TeamId,
    pub team_b_id: TeamId,
    pub status: MatchStatus,
    pub paused: bool,
    pub score_a: i32,
    pub score_b: i32,
    pub ruleset: Ruleset,
    pub config_ot: bool,
    pub config_knife_round: bool,
    pub config_password: String,
    pub map_mode: MapMode,
    pub current_map: i32,
    pub start_time: DateTime<Utc>,
}

impl Match {
    pub fn new(
        server_id: ServerId,
        season_id: SeasonId,
        team_a_id: TeamId,
        team_b_id: TeamId,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            name: String::new(),
            server_id,
            season_id,
            team_a_id,
            team_b_id,
            status: MatchStatus::default(),
            paused: false,
            score_a: 0,
            score_b: 0,
            ruleset: Ruleset::default(),
            config_ot: true,
            config_knife_round: false,
            config_password: String::new(),
            map_mode: MapMode::default(),
            current_map: 0,
            start_time,
        }
    }

    /// Slot of the team currently ahead, `Other` on a tie.
    pub fn leader(&self) -> TeamSlot {
        match self.score_a.cmp(&self.score_b) {
            std::cmp::Ordering::Greater => TeamSlot::A,
            std::cmp::Ordering::Less => TeamSlot::B,
            std::cmp::Ordering::Equal => TeamSlot::Other,
        }
    }
}

/// One map played within a match. `sha1sum` addresses the demo archive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchMap {
    pub match_id: MatchId,
    pub map_name: String,
    pub score_1: i32,
    pub score_2: i32,
    pub current_period: i32,
    pub zip_url: String,
    pub sha1sum: String,
    pub has_demo: bool,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl MatchMap {
    pub fn new(
        match_id: MatchId,
        map_name: impl Into<String>,
        sha1sum: impl Into<String>,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            match_id,
            map_name: map_name.into(),
            score_1: 0,
            score_2: 0,
            current_period: 0,
            zip_url: String::new(),
            sha1sum: sha1sum.into(),
            has_demo: false,
            start_time,
            end_time: start_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchMapScore {
    pub match_map_id: MatchMapId,
    pub score_type: ScoreType,
    pub score1_half1: i32,
    pub score1_half2: i32,
    pub score2_half1: i32,
    pub score2_half2: i32,
}

impl MatchMapScore {
    pub fn total_1(&self) -> i32 {
        self.score1_half1 + self.score1_half2
    }

    pub fn total_2(&self) -> i32 {
        self.score2_half1 + self.score2_half2
    }
}

/// One round within a map
///
/// `team_win`, `ct_win` and `t_win` encode the same fact three ways. They
/// are kept as written by the producer; read the winner through
/// [`Round::winning_side`] and audit consistency with
/// [`crate::storage::contracts`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub match_id: MatchId,
    pub match_map_id: MatchMapId,
    pub round_number: i32,
    pub bomb_planted: bool,
    pub bomb_defused: bool,
    pub bomb_exploded: bool,
    pub win_type: WinType,
    pub team_win: TeamSlot,
    pub ct_win: bool,
    pub t_win: bool,
    pub score_a: i32,
    pub score_b: i32,
    pub backup_file_name: String,
}

impl Round {
    pub fn new(match_id: MatchId, match_map_id: MatchMapId, round_number: i32) -> Self {
        Self {
            match_id,
            match_map_id,
            round_number,
            bomb_planted: false,
            bomb_defused: false,
            bomb_exploded: false,
            win_type: WinType::default(),
            team_win: TeamSlot::Other,
            ct_win: false,
            t_win: false,
            score_a: 0,
            score_b: 0,
            backup_file_name: String::new(),
        }
    }

    /// Set all three winner encodings from one source.
    pub fn set_winner(&mut self, team: TeamSlot, side: Side) {
        self.team_win = team;
        self.ct_win = side == Side::Ct;
        self.t_win = side == Side::T;
    }

    /// Winning side, or `None` when the flags are unset or contradictory.
    pub fn winning_side(&self) -> Option<Side> {
        match (self.ct_win, self.t_win) {
            (true, false) => Some(Side::Ct),
            (false, true) => Some(Side::T),
            _ => None,
        }
    }
}

/// A registered competitor account
///
/// The authentication columns (`password`, `last_login`, `is_superuser`,
/// `is_staff`, `is_active`) are owned by the external auth system and
/// stored opaquely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(skip_serializing, default)]
    pub password: String,
    pub last_login: DateTime<Utc>,
    pub is_superuser: bool,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
    pub steamid: i64,
    pub profileurl: String,
    pub avatar: String,
    pub avatarmedium: String,
    pub avatarfull: String,
    pub is_banned: bool,
    pub reputation: i32,
    pub rating: f64,
    pub rating_variance: f64,
}

impl Player {
    pub fn new(username: impl Into<String>, steamid: i64) -> Self {
        let now = Utc::now();
        Self {
            password: String::new(),
            last_login: now,
            is_superuser: false,
            username: username.into(),
            email: String::new(),
            is_staff: false,
            is_active: true,
            date_joined: now,
            steamid,
            profileurl: String::new(),
            avatar: String::new(),
            avatarmedium: String::new(),
            avatarfull: String::new(),
            is_banned: false,
            reputation: 0,
            rating: DEFAULT_RATING,
            rating_variance: DEFAULT_RATING_VARIANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerBan {
    pub player_id: PlayerId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub reason: String,
    pub link: String,
}

impl PlayerBan {
    pub fn in_effect_on(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// An address seen for a player. `(player_id, ip)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIp {
    pub player_id: PlayerId,
    pub ip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerKill {
    pub match_id: MatchId,
    pub match_map_id: MatchMapId,
    pub round_id: RoundId,
    pub killer_id: PlayerId,
    pub killer_team: Side,
    pub victim_id: PlayerId,
    pub victim_team: Side,
    pub weapon: String,
    pub headshot: bool,
}

impl PlayerKill {
    pub fn is_team_kill(&self) -> bool {
        self.killer_team == self.victim_team && self.killer_team != Side::Other
    }
}

/// Counting stats shared by the round, match and season stat tables
///
/// `k1..k5` count rounds in which the player got exactly that many kills;
/// `clutch_vN` counts rounds won alone against N opponents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLine {
    pub kills: i32,
    pub assists: i32,
    pub deaths: i32,
    pub defuses: i32,
    pub plants: i32,
    pub tks: i32,
    pub clutch_v1: i32,
    pub clutch_v2: i32,
    pub clutch_v3: i32,
    pub clutch_v4: i32,
    pub clutch_v5: i32,
    pub k1: i32,
    pub k2: i32,
    pub k3: i32,
    pub k4: i32,
    pub k5: i32,
}

impl StatLine {
    /// Kills implied by the multi-kill counters.
    pub fn multikill_kills(&self) -> i64 {
        self.k1 as i64
            + 2 * self.k2 as i64
            + 3 * self.k3 as i64
            + 4 * self.k4 as i64
            + 5 * self.k5 as i64
    }

    pub fn clutches_won(&self) -> i64 {
        [
            self.clutch_v1,
            self.clutch_v2,
            self.clutch_v3,
            self.clutch_v4,
            self.clutch_v5,
        ]
        .iter()
        .map(|&c| c as i64)
        .sum()
    }

    /// Record `kills` kills in a single round, bumping the matching kN counter.
    pub fn add_round_kills(&mut self, kills: i32) {
        self.kills += kills;
        match kills {
            1 => self.k1 += 1,
            2 => self.k2 += 1,
            3 => self.k3 += 1,
            4 => self.k4 += 1,
            5 => self.k5 += 1,
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRound {
    pub round_id: RoundId,
    pub player_id: PlayerId,
    pub first_side: Side,
    pub current_side: Side,
    #[serde(flatten)]
    pub stats: StatLine,
    pub damage: i32,
    pub rws: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerMatch {
    pub match_id: MatchId,
    pub match_map_id: MatchMapId,
    pub player_id: PlayerId,
    pub team: TeamSlot,
    pub first_side: Side,
    pub current_side: Side,
    pub nickname: String,
    #[serde(flatten)]
    pub stats: StatLine,
    pub score: i32,
    pub hsp: f64,
    pub adr: f64,
    pub rws: f64,
    pub rounds_won: i32,
    pub rounds_lost: i32,
    pub rounds_tied: i32,
}

impl PlayerMatch {
    pub fn rounds_played(&self) -> i32 {
        self.rounds_won + self.rounds_lost + self.rounds_tied
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSeason {
    pub player_id: PlayerId,
    pub season_id: SeasonId,
    #[serde(flatten)]
    pub stats: StatLine,
    pub score: i32,
    pub hsp: f64,
    pub adr: f64,
    pub rws: f64,
    pub rounds_won: i32,
    pub rounds_lost: i32,
    pub rounds_tied: i32,
    pub matches_won: i32,
    pub matches_lost: i32,
    pub matches_tied: i32,
}

/// Per-weapon counters shared by the match and season weapon tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub weapon: String,
    pub headshots: i32,
    pub hits: i32,
    pub damage: i32,
    pub kills: i32,
    pub deaths: i32,
}

impl WeaponStats {
    pub fn new(weapon: impl Into<String>) -> Self {
        Self {
            weapon: weapon.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMatchWeapons {
    pub match_id: MatchId,
    pub match_map_id: MatchMapId,
    pub player_id: PlayerId,
    #[serde(flatten)]
    pub stats: WeaponStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSeasonWeapons {
    pub player_id: PlayerId,
    pub season_id: SeasonId,
    #[serde(flatten)]
    pub stats: WeaponStats,
}
