//! Migrate command implementation

use crate::{
    storage::{migrations, LeagueDatabase, MigrationStatus},
    Result,
};

/// Handle `migrate up`
pub fn handle_migrate_up(db: &mut LeagueDatabase, to: Option<u32>) -> Result<()> {
    let applied = db.migrate_up(to)?;
    println!("{}", render_applied(&applied, "Applied"));
    println!("Schema is at version {}", db.current_version()?);
    Ok(())
}

/// Handle `migrate down`
pub fn handle_migrate_down(db: &mut LeagueDatabase, to: Option<u32>) -> Result<()> {
    let rolled_back = db.migrate_down(to)?;
    println!("{}", render_applied(&rolled_back, "Rolled back"));
    println!("Schema is at version {}", db.current_version()?);
    Ok(())
}

/// Handle `migrate status`
pub fn handle_migrate_status(db: &LeagueDatabase, as_json: bool) -> Result<()> {
    let status = db.migration_status()?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        print!("{}", render_status(&status));
    }
    Ok(())
}

pub(crate) fn render_applied(versions: &[u32], verb: &str) -> String {
    if versions.is_empty() {
        return "Nothing to do".to_string();
    }
    let names: Vec<String> = versions
        .iter()
        .map(|v| match migrations::find(*v) {
            Some(m) => format!("{:04}_{}", m.version, m.name),
            None => format!("{:04}", v),
        })
        .collect();
    format!("{} {}", verb, names.join(", "))
}

pub(crate) fn render_status(status: &[MigrationStatus]) -> String {
    let mut out = String::new();
    for s in status {
        let mark = if s.applied { "x" } else { " " };
        out.push_str(&format!("[{}] {:04}_{}\n", mark, s.version, s.name));
    }
    out
}
