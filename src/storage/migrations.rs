//! Versioned schema migrations
//!
//! A migration is an ordered list of [`Operation`]s. Each operation has an
//! exact inverse, and a migration's backward step is the inverse of every
//! forward operation applied in reverse order, so migrating up and then
//! back down leaves the schema exactly as it was.
//!
//! Applied versions are recorded in `schema_migrations`. Every migration
//! runs in its own transaction.

use super::schema::LeagueDatabase;
use chrono::Utc;
use crate::error::{LeagueError, Result};
use rusqlite::params;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info};

pub(crate) const BOOKKEEPING_TABLE: &str = "schema_migrations";

/// One reversible schema change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateTable {
        name: &'static str,
        columns: &'static str,
    },
    DropTable {
        name: &'static str,
        columns: &'static str,
    },
    AddUnique {
        name: &'static str,
        table: &'static str,
        columns: &'static [&'static str],
    },
    DropUnique {
        name: &'static str,
        table: &'static str,
        columns: &'static [&'static str],
    },
    CreateIndex {
        name: &'static str,
        table: &'static str,
        columns: &'static [&'static str],
    },
    DropIndex {
        name: &'static str,
        table: &'static str,
        columns: &'static [&'static str],
    },
}

impl Operation {
    /// The operation that undoes this one.
    pub fn inverse(&self) -> Operation {
        match *self {
            Operation::CreateTable { name, columns } => Operation::DropTable { name, columns },
            Operation::DropTable { name, columns } => Operation::CreateTable { name, columns },
            Operation::AddUnique {
                name,
                table,
                columns,
            } => Operation::DropUnique {
                name,
                table,
                columns,
            },
            Operation::DropUnique {
                name,
                table,
                columns,
            } => Operation::AddUnique {
                name,
                table,
                columns,
            },
            Operation::CreateIndex {
                name,
                table,
                columns,
            } => Operation::DropIndex {
                name,
                table,
                columns,
            },
            Operation::DropIndex {
                name,
                table,
                columns,
            } => Operation::CreateIndex {
                name,
                table,
                columns,
            },
        }
    }

    pub fn sql(&self) -> String {
        match self {
            Operation::CreateTable { name, columns } => {
                format!("CREATE TABLE {} (\n{}\n)", name, columns.trim_matches('\n'))
            }
            Operation::DropTable { name, .. } => format!("DROP TABLE {}", name),
            Operation::AddUnique {
                name,
                table,
                columns,
            } => format!(
                "CREATE UNIQUE INDEX {} ON {} ({})",
                name,
                table,
                columns.join(", ")
            ),
            Operation::CreateIndex {
                name,
                table,
                columns,
            } => format!("CREATE INDEX {} ON {} ({})", name, table, columns.join(", ")),
            Operation::DropUnique { name, .. } | Operation::DropIndex { name, .. } => {
                format!("DROP INDEX {}", name)
            }
        }
    }
}

/// A numbered group of operations applied atomically.
#[derive(Debug)]
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    pub operations: &'static [Operation],
}

impl Migration {
    pub fn forwards(&self) -> Vec<Operation> {
        self.operations.to_vec()
    }

    pub fn backwards(&self) -> Vec<Operation> {
        self.operations.iter().rev().map(Operation::inverse).collect()
    }
}

/// Whether a known migration has been applied to a database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationStatus {
    pub version: u32,
    pub name: &'static str,
    pub applied: bool,
    pub applied_at: Option<i64>,
}

/// A table or index as recorded in `sqlite_master`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SchemaObject {
    pub kind: String,
    pub name: String,
    pub table: String,
    pub sql: Option<String>,
}

/// Every user-visible table and index, bookkeeping excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaSnapshot {
    pub objects: BTreeSet<SchemaObject>,
}

impl SchemaSnapshot {
    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.objects
            .iter()
            .filter(|o| o.kind == "table")
            .map(|o| o.name.as_str())
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.tables().any(|t| t == name)
    }

    pub fn has_index(&self, name: &str) -> bool {
        self.objects
            .iter()
            .any(|o| o.kind == "index" && o.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// All known migrations in version order.
pub fn all() -> &'static [Migration] {
    MIGRATIONS
}

pub fn latest_version() -> u32 {
    MIGRATIONS.last().map(|m| m.version).unwrap_or(0)
}

pub fn find(version: u32) -> Option<&'static Migration> {
    MIGRATIONS.iter().find(|m| m.version == version)
}

impl LeagueDatabase {
    pub(crate) fn ensure_bookkeeping(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Versions recorded as applied, ascending.
    pub fn applied_versions(&self) -> Result<Vec<u32>> {
        let mut stmt = self
            .conn
            .prepare("SELECT version FROM schema_migrations ORDER BY version")?;
        let rows = stmt.query_map([], |row| row.get::<_, u32>(0))?;

        let mut versions = Vec::new();
        for row in rows {
            versions.push(row?);
        }
        Ok(versions)
    }

    /// Highest applied version, 0 for an empty database.
    pub fn current_version(&self) -> Result<u32> {
        let version: Option<u32> =
            self.conn
                .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
                    row.get(0)
                })?;
        let version = version.unwrap_or(0);

        let latest = latest_version();
        if version > latest {
            return Err(LeagueError::SchemaTooNew {
                found: version,
                latest,
            });
        }
        Ok(version)
    }

    /// Apply pending migrations up to `target` (latest when `None`).
    ///
    /// Returns the versions applied, in order.
    pub fn migrate_up(&mut self, target: Option<u32>) -> Result<Vec<u32>> {
        let target = resolve_target(target.unwrap_or_else(latest_version))?;
        let applied: BTreeSet<u32> = self.applied_versions()?.into_iter().collect();
        self.current_version()?;

        let mut done = Vec::new();
        for migration in MIGRATIONS
            .iter()
            .filter(|m| m.version <= target && !applied.contains(&m.version))
        {
            self.apply(migration, &migration.forwards(), true)?;
            done.push(migration.version);
        }
        Ok(done)
    }

    /// Roll back applied migrations above `target` (everything when `None`).
    ///
    /// Returns the versions rolled back, newest first.
    pub fn migrate_down(&mut self, target: Option<u32>) -> Result<Vec<u32>> {
        let target = resolve_target(target.unwrap_or(0))?;
        self.current_version()?;

        let mut done = Vec::new();
        for version in self.applied_versions()?.into_iter().rev() {
            if version <= target {
                break;
            }
            let migration = find(version).ok_or(LeagueError::UnknownMigration { version })?;
            self.apply(migration, &migration.backwards(), false)?;
            done.push(version);
        }
        Ok(done)
    }

    fn apply(&mut self, migration: &Migration, operations: &[Operation], up: bool) -> Result<()> {
        let direction = if up { "forwards" } else { "backwards" };
        info!(
            version = migration.version,
            name = migration.name,
            "Migrating {}",
            direction
        );

        let tx = self.conn.transaction()?;
        for op in operations {
            let sql = op.sql();
            debug!(%sql, "Executing schema operation");
            tx.execute_batch(&sql)?;
        }

        if up {
            let now = Utc::now().timestamp();
            tx.execute(
                "INSERT INTO schema_migrations (version, name, applied_at) VALUES (?, ?, ?)",
                params![migration.version, migration.name, now],
            )?;
        } else {
            tx.execute(
                "DELETE FROM schema_migrations WHERE version = ?",
                params![migration.version],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Applied/pending state of every known migration.
    pub fn migration_status(&self) -> Result<Vec<MigrationStatus>> {
        let mut stmt = self
            .conn
            .prepare("SELECT version, applied_at FROM schema_migrations")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, i64>(1)?)))?;

        let mut applied = std::collections::BTreeMap::new();
        for row in rows {
            let (version, at) = row?;
            applied.insert(version, at);
        }

        Ok(MIGRATIONS
            .iter()
            .map(|m| MigrationStatus {
                version: m.version,
                name: m.name,
                applied: applied.contains_key(&m.version),
                applied_at: applied.get(&m.version).copied(),
            })
            .collect())
    }

    /// Tables and indexes currently defined, bookkeeping excluded.
    pub fn snapshot(&self) -> Result<SchemaSnapshot> {
        let mut stmt = self.conn.prepare(
            "SELECT type, name, tbl_name, sql FROM sqlite_master
             WHERE type IN ('table', 'index')
               AND name NOT LIKE 'sqlite_%'
               AND tbl_name != ?",
        )?;
        let rows = stmt.query_map([BOOKKEEPING_TABLE], |row| {
            Ok(SchemaObject {
                kind: row.get(0)?,
                name: row.get(1)?,
                table: row.get(2)?,
                sql: row.get(3)?,
            })
        })?;

        let mut snapshot = SchemaSnapshot::default();
        for row in rows {
            snapshot.objects.insert(row?);
        }
        Ok(snapshot)
    }
}

fn resolve_target(version: u32) -> Result<u32> {
    if version == 0 || find(version).is_some() {
        Ok(version)
    } else {
        Err(LeagueError::UnknownMigration { version })
    }
}

// Shared stat-line columns for the round, match and season stat tables.
macro_rules! stat_line_columns {
    () => {
        "    kills INTEGER NOT NULL,
    assists INTEGER NOT NULL,
    deaths INTEGER NOT NULL,
    defuses INTEGER NOT NULL,
    plants INTEGER NOT NULL,
    tks INTEGER NOT NULL,
    clutch_v1 INTEGER NOT NULL,
    clutch_v2 INTEGER NOT NULL,
    clutch_v3 INTEGER NOT NULL,
    clutch_v4 INTEGER NOT NULL,
    clutch_v5 INTEGER NOT NULL,
    k1 INTEGER NOT NULL,
    k2 INTEGER NOT NULL,
    k3 INTEGER NOT NULL,
    k4 INTEGER NOT NULL,
    k5 INTEGER NOT NULL,"
    };
}

macro_rules! weapon_columns {
    () => {
        "    weapon VARCHAR(64) NOT NULL,
    headshots INTEGER NOT NULL,
    hits INTEGER NOT NULL,
    damage INTEGER NOT NULL,
    kills INTEGER NOT NULL,
    deaths INTEGER NOT NULL"
    };
}

const SEASONS: &str = r#"
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(64) NOT NULL,
    event VARCHAR(64) NOT NULL,
    "start" DATE NOT NULL,
    "end" DATE NOT NULL,
    link VARCHAR(128) NOT NULL,
    logo VARCHAR(256) NOT NULL,
    is_active BOOLEAN NOT NULL
"#;

const TEAMS: &str = "
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(128) NOT NULL,
    shorthandle VARCHAR(64) NOT NULL,
    link VARCHAR(128) NOT NULL
";

const SERVERS: &str = "
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(128) NOT NULL,
    ip VARCHAR(16) NOT NULL,
    port INTEGER NOT NULL DEFAULT 27015,
    gotv_ip VARCHAR(16) NOT NULL DEFAULT '',
    gotv_port INTEGER NOT NULL DEFAULT 27020,
    rcon VARCHAR(64) NOT NULL DEFAULT ''
";

const PLAYERS: &str = "
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    password VARCHAR(128) NOT NULL,
    last_login DATETIME NOT NULL,
    is_superuser BOOLEAN NOT NULL DEFAULT 0,
    username VARCHAR(64) NOT NULL,
    email VARCHAR(75) NOT NULL DEFAULT '',
    is_staff BOOLEAN NOT NULL DEFAULT 0,
    is_active BOOLEAN NOT NULL DEFAULT 1,
    date_joined DATETIME NOT NULL,
    steamid BIGINT NOT NULL UNIQUE,
    profileurl VARCHAR(256) NOT NULL,
    avatar VARCHAR(256) NOT NULL,
    avatarmedium VARCHAR(256) NOT NULL,
    avatarfull VARCHAR(256) NOT NULL,
    is_banned BOOLEAN NOT NULL DEFAULT 0,
    reputation INTEGER NOT NULL DEFAULT 0,
    rating REAL NOT NULL DEFAULT 25.0,
    rating_variance REAL NOT NULL DEFAULT 8.333
";

const PLAYER_GROUPS: &str = "
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    player_id INTEGER NOT NULL REFERENCES players (id),
    group_id INTEGER NOT NULL
";

const PLAYER_USER_PERMISSIONS: &str = "
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    player_id INTEGER NOT NULL REFERENCES players (id),
    permission_id INTEGER NOT NULL
";

const PLAYER_BANS: &str = r#"
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    player_id INTEGER NOT NULL REFERENCES players (id),
    "start" DATE NOT NULL,
    "end" DATE NOT NULL,
    reason VARCHAR(256) NOT NULL,
    link VARCHAR(256) NOT NULL
"#;

const PLAYER_IPS: &str = "
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    player_id INTEGER NOT NULL REFERENCES players (id),
    ip VARCHAR(16) NOT NULL
";

const TEAM_SEASONS: &str = "
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    team_id INTEGER NOT NULL REFERENCES teams (id),
    season_id INTEGER NOT NULL REFERENCES seasons (id)
";

const MATCHES: &str = "
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(64) NOT NULL DEFAULT '',
    server_id INTEGER NOT NULL REFERENCES servers (id),
    season_id INTEGER NOT NULL REFERENCES seasons (id),
    team_a_id INTEGER NOT NULL REFERENCES teams (id),
    team_b_id INTEGER NOT NULL REFERENCES teams (id),
    status INTEGER NOT NULL DEFAULT 1,
    paused BOOLEAN NOT NULL DEFAULT 0,
    score_a INTEGER NOT NULL,
    score_b INTEGER NOT NULL,
    ruleset INTEGER NOT NULL DEFAULT 1,
    config_ot BOOLEAN NOT NULL DEFAULT 1,
    config_knife_round BOOLEAN NOT NULL DEFAULT 0,
    config_password VARCHAR(64) NOT NULL DEFAULT '',
    map_mode INTEGER NOT NULL DEFAULT 0,
    current_map INTEGER NOT NULL,
    start_time DATETIME NOT NULL
";

const MATCH_MAPS: &str = "
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    match_id INTEGER NOT NULL REFERENCES matches (id),
    map_name VARCHAR(64) NOT NULL,
    score_1 INTEGER NOT NULL,
    score_2 INTEGER NOT NULL,
    current_period INTEGER NOT NULL,
    zip_url VARCHAR(256) NOT NULL,
    sha1sum VARCHAR(40) NOT NULL UNIQUE,
    has_demo BOOLEAN NOT NULL DEFAULT 0,
    start_time DATETIME NOT NULL,
    end_time DATETIME NOT NULL
";

const MATCH_MAP_SCORES: &str = "
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    match_map_id INTEGER NOT NULL REFERENCES match_maps (id),
    score_type INTEGER NOT NULL DEFAULT 0,
    score1_half1 INTEGER NOT NULL,
    score1_half2 INTEGER NOT NULL,
    score2_half1 INTEGER NOT NULL,
    score2_half2 INTEGER NOT NULL
";

const ROUNDS: &str = "
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    match_id INTEGER NOT NULL REFERENCES matches (id),
    match_map_id INTEGER NOT NULL REFERENCES match_maps (id),
    round_number INTEGER NOT NULL,
    bomb_planted BOOLEAN NOT NULL,
    bomb_defused BOOLEAN NOT NULL,
    bomb_exploded BOOLEAN NOT NULL,
    win_type INTEGER NOT NULL DEFAULT 0,
    team_win INTEGER NOT NULL,
    ct_win BOOLEAN NOT NULL,
    t_win BOOLEAN NOT NULL,
    score_a INTEGER NOT NULL,
    score_b INTEGER NOT NULL,
    backup_file_name VARCHAR(256) NOT NULL
";

const PLAYER_KILLS: &str = "
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    match_id INTEGER NOT NULL REFERENCES matches (id),
    match_map_id INTEGER NOT NULL REFERENCES match_maps (id),
    round_id INTEGER NOT NULL REFERENCES rounds (id),
    killer_id INTEGER NOT NULL REFERENCES players (id),
    killer_team INTEGER NOT NULL,
    victim_id INTEGER NOT NULL REFERENCES players (id),
    victim_team INTEGER NOT NULL,
    weapon VARCHAR(64) NOT NULL,
    headshot BOOLEAN NOT NULL
";

const PLAYER_ROUNDS: &str = concat!(
    "
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    round_id INTEGER NOT NULL REFERENCES rounds (id),
    player_id INTEGER NOT NULL REFERENCES players (id),
    first_side INTEGER NOT NULL,
    current_side INTEGER NOT NULL,
",
    stat_line_columns!(),
    "
    damage INTEGER NOT NULL,
    rws REAL NOT NULL
"
);

const PLAYER_MATCHES: &str = concat!(
    "
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    match_id INTEGER NOT NULL REFERENCES matches (id),
    match_map_id INTEGER NOT NULL REFERENCES match_maps (id),
    player_id INTEGER NOT NULL REFERENCES players (id),
    team INTEGER NOT NULL DEFAULT 0,
    first_side INTEGER NOT NULL,
    current_side INTEGER NOT NULL,
    nickname VARCHAR(256) NOT NULL,
",
    stat_line_columns!(),
    "
    score INTEGER NOT NULL,
    hsp REAL NOT NULL,
    adr REAL NOT NULL,
    rws REAL NOT NULL,
    rounds_won INTEGER NOT NULL,
    rounds_lost INTEGER NOT NULL,
    rounds_tied INTEGER NOT NULL
"
);

const PLAYER_MATCH_WEAPONS: &str = concat!(
    "
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    match_id INTEGER NOT NULL REFERENCES matches (id),
    match_map_id INTEGER NOT NULL REFERENCES match_maps (id),
    player_id INTEGER NOT NULL REFERENCES players (id),
",
    weapon_columns!(),
    "
"
);

const PLAYER_SEASONS: &str = concat!(
    "
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    player_id INTEGER NOT NULL REFERENCES players (id),
    season_id INTEGER NOT NULL REFERENCES seasons (id),
",
    stat_line_columns!(),
    "
    score INTEGER NOT NULL,
    hsp REAL NOT NULL,
    adr REAL NOT NULL,
    rws REAL NOT NULL,
    rounds_won INTEGER NOT NULL,
    rounds_lost INTEGER NOT NULL,
    rounds_tied INTEGER NOT NULL,
    matches_won INTEGER NOT NULL,
    matches_lost INTEGER NOT NULL,
    matches_tied INTEGER NOT NULL
"
);

const PLAYER_SEASON_WEAPONS: &str = concat!(
    "
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    player_id INTEGER NOT NULL REFERENCES players (id),
    season_id INTEGER NOT NULL REFERENCES seasons (id),
",
    weapon_columns!(),
    "
"
);

const INITIAL: &[Operation] = &[
    Operation::CreateTable {
        name: "seasons",
        columns: SEASONS,
    },
    Operation::CreateTable {
        name: "teams",
        columns: TEAMS,
    },
    Operation::CreateTable {
        name: "servers",
        columns: SERVERS,
    },
    Operation::AddUnique {
        name: "servers_ip_port_uniq",
        table: "servers",
        columns: &["ip", "port"],
    },
    Operation::CreateTable {
        name: "players",
        columns: PLAYERS,
    },
    Operation::CreateTable {
        name: "player_groups",
        columns: PLAYER_GROUPS,
    },
    Operation::AddUnique {
        name: "player_groups_player_id_group_id_uniq",
        table: "player_groups",
        columns: &["player_id", "group_id"],
    },
    Operation::CreateTable {
        name: "player_user_permissions",
        columns: PLAYER_USER_PERMISSIONS,
    },
    Operation::AddUnique {
        name: "player_user_permissions_player_id_permission_id_uniq",
        table: "player_user_permissions",
        columns: &["player_id", "permission_id"],
    },
    Operation::CreateTable {
        name: "player_bans",
        columns: PLAYER_BANS,
    },
    Operation::CreateTable {
        name: "player_ips",
        columns: PLAYER_IPS,
    },
    Operation::AddUnique {
        name: "player_ips_player_id_ip_uniq",
        table: "player_ips",
        columns: &["player_id", "ip"],
    },
    Operation::CreateTable {
        name: "team_seasons",
        columns: TEAM_SEASONS,
    },
    Operation::CreateTable {
        name: "matches",
        columns: MATCHES,
    },
    Operation::CreateTable {
        name: "match_maps",
        columns: MATCH_MAPS,
    },
    Operation::CreateTable {
        name: "match_map_scores",
        columns: MATCH_MAP_SCORES,
    },
    Operation::CreateTable {
        name: "rounds",
        columns: ROUNDS,
    },
    Operation::CreateTable {
        name: "player_kills",
        columns: PLAYER_KILLS,
    },
    Operation::CreateTable {
        name: "player_rounds",
        columns: PLAYER_ROUNDS,
    },
    Operation::CreateTable {
        name: "player_matches",
        columns: PLAYER_MATCHES,
    },
    Operation::CreateTable {
        name: "player_match_weapons",
        columns: PLAYER_MATCH_WEAPONS,
    },
    Operation::CreateTable {
        name: "player_seasons",
        columns: PLAYER_SEASONS,
    },
    Operation::CreateTable {
        name: "player_season_weapons",
        columns: PLAYER_SEASON_WEAPONS,
    },
];

macro_rules! index {
    ($name:literal, $table:literal, [$($col:literal),+]) => {
        Operation::CreateIndex {
            name: $name,
            table: $table,
            columns: &[$($col),+],
        }
    };
}

const FOREIGN_KEY_INDEXES: &[Operation] = &[
    index!("team_seasons_team_id_idx", "team_seasons", ["team_id"]),
    index!("team_seasons_season_id_idx", "team_seasons", ["season_id"]),
    index!("matches_season_id_idx", "matches", ["season_id"]),
    index!("matches_server_id_idx", "matches", ["server_id"]),
    index!("matches_team_a_id_idx", "matches", ["team_a_id"]),
    index!("matches_team_b_id_idx", "matches", ["team_b_id"]),
    index!("match_maps_match_id_idx", "match_maps", ["match_id"]),
    index!("match_map_scores_match_map_id_idx", "match_map_scores", ["match_map_id"]),
    index!("rounds_match_id_idx", "rounds", ["match_id"]),
    index!("rounds_match_map_id_idx", "rounds", ["match_map_id", "round_number"]),
    index!("player_bans_player_id_idx", "player_bans", ["player_id"]),
    index!("player_kills_round_id_idx", "player_kills", ["round_id"]),
    index!("player_kills_match_map_id_idx", "player_kills", ["match_map_id"]),
    index!("player_kills_killer_id_idx", "player_kills", ["killer_id"]),
    index!("player_kills_victim_id_idx", "player_kills", ["victim_id"]),
    index!("player_rounds_round_id_idx", "player_rounds", ["round_id"]),
    index!("player_rounds_player_id_idx", "player_rounds", ["player_id"]),
    index!("player_matches_match_id_idx", "player_matches", ["match_id"]),
    index!("player_matches_player_id_idx", "player_matches", ["player_id"]),
    index!("player_match_weapons_match_player_idx", "player_match_weapons", ["match_id", "player_id"]),
    index!("player_seasons_season_player_idx", "player_seasons", ["season_id", "player_id"]),
    index!("player_season_weapons_season_player_idx", "player_season_weapons", ["season_id", "player_id"]),
];

static MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "initial",
        operations: INITIAL,
    },
    Migration {
        version: 2,
        name: "foreign_key_indexes",
        operations: FOREIGN_KEY_INDEXES,
    },
];
