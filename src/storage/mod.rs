//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - projects(id, name) with a global UNIQUE constraint on name
//! - subdomains(id, project_id, name) with UNIQUE(project_id, name) and
//!   ON DELETE CASCADE back to projects
//! - subdomains_fts, an FTS5 external-content index over subdomain names,
//!   kept current by insert/update/delete triggers

pub mod schema;
pub mod sqlite;

pub use sqlite::SqliteStore;
