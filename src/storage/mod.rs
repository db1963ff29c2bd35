//! Storage layer for the league database
//!
//! This module provides the SQLite-backed schema and its access paths,
//! organized into logical components:
//! - `models`: One struct per table
//! - `schema`: Database connection management
//! - `migrations`: Versioned, reversible schema changes
//! - `tables`: Row mapping between models and columns
//! - `queries`: CRUD operations and lookups
//! - `contracts`: Audit of producer-side invariants the schema cannot enforce

pub mod contracts;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod schema;
pub mod tables;

#[cfg(test)]
mod tests;

// Re-export the main types and database struct for easy access
pub use contracts::{ContractViolation, ViolationKind};
pub use migrations::{Migration, MigrationStatus, Operation, SchemaObject, SchemaSnapshot};
pub use models::*;
pub use schema::LeagueDatabase;
pub use tables::TableRow;
