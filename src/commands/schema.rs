//! Schema command implementation

use crate::{
    storage::{LeagueDatabase, SchemaSnapshot},
    Result,
};

/// Handle `schema`
pub fn handle_schema(db: &LeagueDatabase, as_json: bool) -> Result<()> {
    let snapshot = db.snapshot()?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else if snapshot.is_empty() {
        println!("Schema is empty (version {})", db.current_version()?);
    } else {
        print!("{}", render_snapshot(&snapshot));
    }
    Ok(())
}

/// One line per table, with its indexes indented beneath it.
pub(crate) fn render_snapshot(snapshot: &SchemaSnapshot) -> String {
    let mut out = String::new();
    for table in snapshot.tables() {
        out.push_str(table);
        out.push('\n');
        for index in snapshot
            .objects
            .iter()
            .filter(|o| o.kind == "index" && o.table == table)
        {
            out.push_str(&format!("  {}\n", index.name));
        }
    }
    out
}
