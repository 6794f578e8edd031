//! # Bountycatch - Bug Bounty Target Tracker
//!
//! Tracks reconnaissance targets as named projects, each holding a set of
//! discovered subdomains, persisted in a single SQLite database file.
//!
//! Bountycatch provides:
//! - Projects with globally unique names and cascade-on-delete subdomains
//! - Single and bulk subdomain import with new/duplicate accounting
//! - FTS5 full-text search over subdomain names, kept in sync by triggers
//! - Substring search over project names

pub mod config;
pub mod project;
pub mod storage;

// Re-exports for convenient access
pub use project::{ImportReport, Project};
pub use storage::SqliteStore;

/// Result type alias for Bountycatch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Bountycatch operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}
