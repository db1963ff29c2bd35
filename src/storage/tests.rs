//! Unit tests for storage functionality

use super::*;
use crate::error::LeagueError;
use crate::types::*;
use chrono::{NaiveDate, TimeZone, Utc};

fn create_test_db() -> LeagueDatabase {
    LeagueDatabase::new_in_memory().unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct Fixture {
    db: LeagueDatabase,
    season: SeasonId,
    team_a: TeamId,
    team_b: TeamId,
    server: ServerId,
    match_id: MatchId,
    map: MatchMapId,
    round: RoundId,
    player: PlayerId,
}

fn create_test_db_with_match() -> Fixture {
    let mut db = create_test_db();
    let season = db
        .insert(&Season::new("Season 1", date(2014, 1, 1), date(2014, 3, 31)))
        .unwrap();
    let team_a = db.insert(&Team::new("Alpha", "ALP")).unwrap();
    let team_b = db.insert(&Team::new("Bravo", "BRV")).unwrap();
    let server = db.insert(&Server::new("pug-1", "10.0.0.1")).unwrap();

    let start = Utc.with_ymd_and_hms(2014, 2, 1, 20, 0, 0).unwrap();
    let match_id = db
        .insert(&Match::new(server, season, team_a, team_b, start))
        .unwrap();
    let map = db
        .insert(&MatchMap::new(match_id, "de_dust2", "a94a8fe5ccb19ba61c4c0873d391e987982fbbd3", start))
        .unwrap();
    let round = db.insert(&Round::new(match_id, map, 1)).unwrap();
    let player = db.insert(&Player::new("astral", 76561197960287930)).unwrap();

    Fixture {
        db,
        season,
        team_a,
        team_b,
        server,
        match_id,
        map,
        round,
        player,
    }
}

#[test]
fn test_database_creation() {
    let db = create_test_db();
    let snapshot = db.snapshot().unwrap();
    assert!(snapshot.has_table("matches"));
    assert!(snapshot.has_table("player_user_permissions"));
}

#[test]
fn test_insert_and_get_season() {
    let mut db = create_test_db();
    let mut season = Season::new("Spring", date(2014, 3, 1), date(2014, 5, 31));
    season.is_active = true;
    season.event = "Open".to_string();

    let id = db.insert(&season).unwrap();
    assert_eq!(db.get::<Season>(id).unwrap(), Some(season));
    assert_eq!(db.active_seasons().unwrap().len(), 1);
}

#[test]
fn test_get_missing_row() {
    let db = create_test_db();
    assert_eq!(db.get::<Team>(TeamId::new(42)).unwrap(), None);
}

#[test]
fn test_match_round_trip_with_defaults() {
    let f = create_test_db_with_match();
    let stored = f.db.get::<Match>(f.match_id).unwrap().unwrap();

    assert_eq!(stored.status, MatchStatus::Pending);
    assert_eq!(stored.ruleset, Ruleset::Esea);
    assert_eq!(stored.map_mode, MapMode::Bo1);
    assert!(stored.config_ot);
    assert!(!stored.config_knife_round);
    assert_eq!(stored.team_a_id, f.team_a);
    assert_eq!(stored.team_b_id, f.team_b);
    assert_eq!(stored.server_id, f.server);
}

#[test]
fn test_player_round_trip() {
    let mut db = create_test_db();
    let mut player = Player::new("astral", 76561197960287930);
    player.password = "pbkdf2$opaque".to_string();

    let id = db.insert(&player).unwrap();
    let stored = db.get::<Player>(id).unwrap().unwrap();

    assert_eq!(stored.password, "pbkdf2$opaque");
    assert_eq!(stored.rating, DEFAULT_RATING);
    assert_eq!(stored.rating_variance, DEFAULT_RATING_VARIANCE);
    assert_eq!(db.find_player_by_steamid(76561197960287930).unwrap().unwrap().id, id);
}

#[test]
fn test_duplicate_server_endpoint_rejected() {
    let mut db = create_test_db();
    db.insert(&Server::new("pug-1", "10.0.0.1")).unwrap();

    let mut other_port = Server::new("pug-2", "10.0.0.1");
    other_port.port = 27016;
    db.insert(&other_port).unwrap();

    let err = db.insert(&Server::new("pug-3", "10.0.0.1")).unwrap_err();
    assert!(matches!(err, LeagueError::UniqueViolation(_)));

    let found = db.find_server("10.0.0.1", 27016).unwrap().unwrap();
    assert_eq!(found.row.name, "pug-2");
    assert_eq!(found.row.address(), "10.0.0.1:27016");
    assert_eq!(found.row.gotv_address(), None);
}

#[test]
fn test_duplicate_sha1sum_rejected() {
    let mut f = create_test_db_with_match();
    let start = Utc.with_ymd_and_hms(2014, 2, 1, 21, 0, 0).unwrap();
    let err = f
        .db
        .insert(&MatchMap::new(f.match_id, "de_inferno", "a94a8fe5ccb19ba61c4c0873d391e987982fbbd3", start))
        .unwrap_err();
    assert!(matches!(err, LeagueError::UniqueViolation(_)));

    let found = f
        .db
        .find_match_map_by_sha1("a94a8fe5ccb19ba61c4c0873d391e987982fbbd3")
        .unwrap()
        .unwrap();
    assert_eq!(found.id, f.map);
}

#[test]
fn test_duplicate_steamid_rejected() {
    let mut db = create_test_db();
    db.insert(&Player::new("one", 1)).unwrap();
    let err = db.insert(&Player::new("two", 1)).unwrap_err();
    assert!(matches!(err, LeagueError::UniqueViolation(_)));
}

#[test]
fn test_duplicate_player_ip_rejected() {
    let mut f = create_test_db_with_match();
    let ip = PlayerIp {
        player_id: f.player,
        ip: "192.168.1.5".to_string(),
    };
    f.db.insert(&ip).unwrap();
    let err = f.db.insert(&ip).unwrap_err();
    assert!(matches!(err, LeagueError::UniqueViolation(_)));
}

#[test]
fn test_record_player_ip_is_idempotent() {
    let mut f = create_test_db_with_match();
    assert!(f.db.record_player_ip(f.player, "192.168.1.5").unwrap());
    assert!(!f.db.record_player_ip(f.player, "192.168.1.5").unwrap());
    assert!(f.db.record_player_ip(f.player, "192.168.1.6").unwrap());

    assert_eq!(f.db.ips_for_player(f.player).unwrap().len(), 2);
    let seen = f.db.players_seen_from("192.168.1.5").unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].id, f.player);
}

#[test]
fn test_insert_with_missing_parent_rejected() {
    let mut db = create_test_db();
    let start = Utc.with_ymd_and_hms(2014, 2, 1, 20, 0, 0).unwrap();
    let orphan = Match::new(ServerId::new(9), SeasonId::new(9), TeamId::new(9), TeamId::new(10), start);

    let err = db.insert(&orphan).unwrap_err();
    assert!(matches!(err, LeagueError::ForeignKeyViolation(_)));
    assert!(err.is_constraint_violation());
}

#[test]
fn test_delete_referenced_parent_rejected() {
    let mut f = create_test_db_with_match();

    let err = f.db.delete_season(f.season).unwrap_err();
    assert!(matches!(err, LeagueError::ForeignKeyViolation(_)));

    f.db.record_player_ip(f.player, "10.1.1.1").unwrap();
    let err = f.db.delete_player(f.player).unwrap_err();
    assert!(matches!(err, LeagueError::ForeignKeyViolation(_)));

    // Nothing was removed
    assert!(f.db.get::<Season>(f.season).unwrap().is_some());
    assert!(f.db.get::<Player>(f.player).unwrap().is_some());
}

#[test]
fn test_delete_unreferenced_rows() {
    let mut db = create_test_db();
    let season = db
        .insert(&Season::new("Empty", date(2015, 1, 1), date(2015, 2, 1)))
        .unwrap();
    let player = db.insert(&Player::new("lurker", 99)).unwrap();

    assert!(db.delete_season(season).unwrap());
    assert!(!db.delete_season(season).unwrap());
    assert!(db.delete_player(player).unwrap());
}

#[test]
fn test_missing_required_column_rejected() {
    let db = create_test_db();
    let err: LeagueError = db
        .connection()
        .execute("INSERT INTO teams (name, shorthandle, link) VALUES (NULL, 'X', '')", [])
        .unwrap_err()
        .into();
    assert!(matches!(err, LeagueError::NotNullViolation(_)));
}

#[test]
fn test_undocumented_enum_code_surfaces_as_error() {
    let f = create_test_db_with_match();
    f.db.connection()
        .execute("UPDATE matches SET status = 9 WHERE id = ?", [f.match_id])
        .unwrap();

    match f.db.get::<Match>(f.match_id).unwrap_err() {
        LeagueError::InvalidEnumValue { kind, value } => {
            assert_eq!(kind, "match status");
            assert_eq!(value, 9);
        }
        other => panic!("Expected InvalidEnumValue, got {:?}", other),
    }
}

#[test]
fn test_update_match_state() {
    let mut f = create_test_db_with_match();
    assert!(f
        .db
        .update_match_state(f.match_id, MatchStatus::Live, 7, 5, 0)
        .unwrap());
    assert!(f.db.set_match_paused(f.match_id, true).unwrap());

    let stored = f.db.get::<Match>(f.match_id).unwrap().unwrap();
    assert_eq!(stored.status, MatchStatus::Live);
    assert_eq!((stored.score_a, stored.score_b), (7, 5));
    assert!(stored.paused);
    assert_eq!(stored.leader(), TeamSlot::A);

    assert_eq!(f.db.matches_with_status(MatchStatus::Live).unwrap().len(), 1);
    assert!(f.db.matches_with_status(MatchStatus::Complete).unwrap().is_empty());
}

#[test]
fn test_rounds_sorted_by_number() {
    let mut f = create_test_db_with_match();
    for n in [3, 2] {
        let mut round = Round::new(f.match_id, f.map, n);
        round.set_winner(TeamSlot::B, Side::T);
        f.db.insert(&round).unwrap();
    }

    let numbers: Vec<i32> = f
        .db
        .rounds_in_map(f.map)
        .unwrap()
        .iter()
        .map(|r| r.row.round_number)
        .collect();
    assert_eq!(numbers, vec![1, 2, 3]);

    let last = f.db.rounds_in_map(f.map).unwrap().pop().unwrap();
    assert_eq!(last.row.winning_side(), Some(Side::T));
    assert_eq!(last.row.team_win, TeamSlot::B);
}

#[test]
fn test_round_children() {
    let mut f = create_test_db_with_match();
    let victim = f.db.insert(&Player::new("victim", 2)).unwrap();

    f.db.insert(&PlayerKill {
        match_id: f.match_id,
        match_map_id: f.map,
        round_id: f.round,
        killer_id: f.player,
        killer_team: Side::Ct,
        victim_id: victim,
        victim_team: Side::T,
        weapon: "ak47".to_string(),
        headshot: true,
    })
    .unwrap();

    let mut stats = StatLine::default();
    stats.add_round_kills(1);
    f.db.insert(&PlayerRound {
        round_id: f.round,
        player_id: f.player,
        first_side: Side::Ct,
        current_side: Side::Ct,
        stats,
        damage: 100,
        rws: 12.5,
    })
    .unwrap();

    let kills = f.db.kills_in_round(f.round).unwrap();
    assert_eq!(kills.len(), 1);
    assert!(kills[0].row.headshot);
    assert!(!kills[0].row.is_team_kill());

    let rounds = f.db.player_rounds_in_round(f.round).unwrap();
    assert_eq!(rounds[0].row.stats.k1, 1);
    assert_eq!(rounds[0].row.rws, 12.5);
}

#[test]
fn test_teams_in_season() {
    let mut f = create_test_db_with_match();
    f.db.enroll_team(f.team_b, f.season).unwrap();

    let teams = f.db.teams_in_season(f.season).unwrap();
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0].id, f.team_b);
    assert_eq!(f.db.matches_in_season(f.season).unwrap().len(), 1);
}

#[test]
fn test_auth_junctions() {
    let mut f = create_test_db_with_match();
    f.db.add_player_group(f.player, 3).unwrap();
    f.db.add_player_group(f.player, 1).unwrap();
    f.db.add_player_permission(f.player, 7).unwrap();

    assert_eq!(f.db.player_groups(f.player).unwrap(), vec![1, 3]);
    assert_eq!(f.db.player_permissions(f.player).unwrap(), vec![7]);

    let err = f.db.add_player_group(f.player, 3).unwrap_err();
    assert!(matches!(err, LeagueError::UniqueViolation(_)));
}

#[test]
fn test_replace_player_season() {
    let mut f = create_test_db_with_match();
    let mut line = PlayerSeason {
        player_id: f.player,
        season_id: f.season,
        stats: StatLine::default(),
        score: 10,
        hsp: 0.4,
        adr: 80.0,
        rws: 9.0,
        rounds_won: 16,
        rounds_lost: 10,
        rounds_tied: 0,
        matches_won: 1,
        matches_lost: 0,
        matches_tied: 0,
    };
    f.db.replace_player_season(&line).unwrap();

    line.score = 25;
    let id = f.db.replace_player_season(&line).unwrap();

    assert_eq!(f.db.count::<PlayerSeason>().unwrap(), 1);
    let stored = f.db.player_season(f.player, f.season).unwrap().unwrap();
    assert_eq!(stored.id, id);
    assert_eq!(stored.row.score, 25);
}

#[test]
fn test_season_leaderboard_ordering() {
    let mut f = create_test_db_with_match();
    let other = f.db.insert(&Player::new("other", 2)).unwrap();

    for (player, rws) in [(f.player, 4.0), (other, 11.0)] {
        f.db.replace_player_season(&PlayerSeason {
            player_id: player,
            season_id: f.season,
            stats: StatLine::default(),
            score: 0,
            hsp: 0.0,
            adr: 0.0,
            rws,
            rounds_won: 0,
            rounds_lost: 0,
            rounds_tied: 0,
            matches_won: 0,
            matches_lost: 0,
            matches_tied: 0,
        })
        .unwrap();
    }

    let board = f.db.season_leaderboard(f.season).unwrap();
    assert_eq!(board[0].row.player_id, other);
    assert_eq!(board[1].row.player_id, f.player);
}

#[test]
fn test_replace_player_season_weapons() {
    let mut f = create_test_db_with_match();
    let mut ak = WeaponStats::new("ak47");
    ak.kills = 12;
    let awp = WeaponStats::new("awp");

    assert_eq!(
        f.db
            .replace_player_season_weapons(f.player, f.season, &[ak.clone(), awp])
            .unwrap(),
        2
    );
    assert_eq!(
        f.db.replace_player_season_weapons(f.player, f.season, &[ak]).unwrap(),
        1
    );

    let weapons = f.db.player_season_weapons(f.player, f.season).unwrap();
    assert_eq!(weapons.len(), 1);
    assert_eq!(weapons[0].row.stats.kills, 12);
}

#[test]
fn test_table_columns_match_values() {
    fn check<T: TableRow>(row: T) {
        assert_eq!(row.values().len(), T::COLUMNS.len(), "{}", T::TABLE);
    }

    let f = create_test_db_with_match();
    let start = Utc.with_ymd_and_hms(2014, 2, 1, 20, 0, 0).unwrap();
    check(Season::new("s", date(2014, 1, 1), date(2014, 1, 2)));
    check(Team::new("t", "T"));
    check(TeamSeason {
        team_id: f.team_a,
        season_id: f.season,
    });
    check(Server::new("s", "127.0.0.1"));
    check(Match::new(f.server, f.season, f.team_a, f.team_b, start));
    check(MatchMap::new(f.match_id, "de_nuke", "x", start));
    check(MatchMapScore {
        match_map_id: f.map,
        score_type: ScoreType::Regulation,
        score1_half1: 0,
        score1_half2: 0,
        score2_half1: 0,
        score2_half2: 0,
    });
    check(Round::new(f.match_id, f.map, 1));
    check(Player::new("p", 1));
    check(PlayerBan {
        player_id: f.player,
        start: date(2014, 1, 1),
        end: date(2014, 1, 2),
        reason: String::new(),
        link: String::new(),
    });
    check(PlayerIp {
        player_id: f.player,
        ip: "127.0.0.1".to_string(),
    });
    check(PlayerMatchWeapons {
        match_id: f.match_id,
        match_map_id: f.map,
        player_id: f.player,
        stats: WeaponStats::new("m4a1"),
    });
    check(PlayerSeasonWeapons {
        player_id: f.player,
        season_id: f.season,
        stats: WeaponStats::new("m4a1"),
    });
}

#[test]
fn test_match_map_score_and_ban_round_trip() {
    let mut f = create_test_db_with_match();
    let score = MatchMapScore {
        match_map_id: f.map,
        score_type: ScoreType::Overtime,
        score1_half1: 2,
        score1_half2: 1,
        score2_half1: 1,
        score2_half2: 2,
    };
    f.db.insert(&score).unwrap();
    let scores = f.db.scores_for_map(f.map).unwrap();
    assert_eq!(scores[0].row, score);
    assert_eq!(scores[0].row.total_1(), 3);
    assert_eq!(scores[0].row.total_2(), 3);

    let ban = PlayerBan {
        player_id: f.player,
        start: date(2014, 2, 1),
        end: date(2014, 2, 14),
        reason: "griefing".to_string(),
        link: String::new(),
    };
    f.db.insert(&ban).unwrap();
    let bans = f.db.bans_for_player(f.player).unwrap();
    assert!(bans[0].row.in_effect_on(date(2014, 2, 10)));
    assert!(!bans[0].row.in_effect_on(date(2014, 3, 1)));

    assert!(f.db.set_player_banned(f.player, true).unwrap());
    assert!(f.db.get::<Player>(f.player).unwrap().unwrap().is_banned);
}

#[test]
fn test_audit_clean_database() {
    let f = create_test_db_with_match();
    assert!(f.db.audit().unwrap().is_empty());
}

#[test]
fn test_audit_reports_violations() {
    let mut f = create_test_db_with_match();

    let mut round = Round::new(f.match_id, f.map, 2);
    round.ct_win = true;
    round.t_win = true;
    round.team_win = TeamSlot::A;
    let bad_round = f.db.insert(&round).unwrap();

    f.db.connection()
        .execute("UPDATE matches SET ruleset = 7 WHERE id = ?", [f.match_id])
        .unwrap();

    let violations = f.db.audit().unwrap();
    assert!(violations.contains(&ContractViolation {
        table: "rounds",
        id: bad_round.as_i64(),
        kind: ViolationKind::BothSidesWon,
    }));
    assert!(violations.contains(&ContractViolation {
        table: "matches",
        id: f.match_id.as_i64(),
        kind: ViolationKind::UndocumentedEnumValue {
            column: "ruleset",
            value: 7,
        },
    }));
}

#[test]
fn test_audit_requires_migrated_schema() {
    let db = LeagueDatabase::open_in_memory().unwrap();
    assert!(matches!(db.audit(), Err(LeagueError::SchemaNotMigrated)));
}

#[test]
fn test_set_player_rating() {
    let mut f = create_test_db_with_match();
    assert!(f.db.set_player_rating(f.player, 31.5, 4.25).unwrap());
    assert!(!f.db.set_player_rating(PlayerId::new(999), 1.0, 1.0).unwrap());

    let stored = f.db.get::<Player>(f.player).unwrap().unwrap();
    assert_eq!(stored.rating, 31.5);
    assert_eq!(stored.rating_variance, 4.25);
}

#[test]
fn test_player_match_stats_and_weapons() {
    let mut f = create_test_db_with_match();
    let mut stats = StatLine::default();
    stats.add_round_kills(2);
    stats.clutch_v1 = 1;

    let line = PlayerMatch {
        match_id: f.match_id,
        match_map_id: f.map,
        player_id: f.player,
        team: TeamSlot::B,
        first_side: Side::T,
        current_side: Side::Ct,
        nickname: "astral".to_string(),
        stats,
        score: 5,
        hsp: 0.5,
        adr: 92.0,
        rws: 14.0,
        rounds_won: 16,
        rounds_lost: 12,
        rounds_tied: 0,
    };
    let id = f.db.insert(&line).unwrap();

    let lines = f.db.player_matches_in_match(f.match_id).unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].id, id);
    assert_eq!(lines[0].row, line);
    assert_eq!(lines[0].row.rounds_played(), 28);
    assert_eq!(lines[0].row.stats.clutches_won(), 1);

    let mut deagle = WeaponStats::new("deagle");
    deagle.headshots = 2;
    deagle.kills = 2;
    let weapons = PlayerMatchWeapons {
        match_id: f.match_id,
        match_map_id: f.map,
        player_id: f.player,
        stats: deagle,
    };
    f.db.insert(&weapons).unwrap();

    let stored = f.db.player_match_weapons(f.match_id, f.player).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].row, weapons);

    let other = f.db.insert(&Player::new("other", 5)).unwrap();
    assert!(f.db.player_match_weapons(f.match_id, other).unwrap().is_empty());
}
