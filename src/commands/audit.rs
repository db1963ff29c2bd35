//! Audit command implementation

use crate::{
    storage::{ContractViolation, LeagueDatabase},
    Result,
};

/// Handle `audit`. Returns the number of violations found.
pub fn handle_audit(db: &LeagueDatabase, as_json: bool) -> Result<usize> {
    let violations = db.audit()?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&violations)?);
    } else {
        print!("{}", render_violations(&violations));
    }
    Ok(violations.len())
}

pub(crate) fn render_violations(violations: &[ContractViolation]) -> String {
    if violations.is_empty() {
        return "No contract violations found\n".to_string();
    }

    let mut out = String::new();
    for v in violations {
        out.push_str(&format!("{}\n", v));
    }
    out.push_str(&format!("{} violation(s)\n", violations.len()));
    out
}
