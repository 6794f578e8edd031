//! SQLite storage implementation

use std::path::Path;

use rusqlite::{ffi, params, Connection, OptionalExtension};

use super::schema;
use crate::Result;

/// SQLite-backed storage for projects and their subdomains
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema. Idempotent: every statement is
    /// IF NOT EXISTS, so re-opening an existing database is safe.
    fn initialize_schema(&self) -> Result<()> {
        // Cascade deletes depend on foreign key enforcement, off by default.
        self.conn.pragma_update(None, "foreign_keys", true)?;
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        tracing::debug!("schema initialized");
        Ok(())
    }

    // ========== Project Operations ==========

    /// Insert a new project. Returns false if the name is already taken;
    /// duplicates are a normal outcome, not an error.
    pub fn add_project(&self, name: &str) -> Result<bool> {
        match self
            .conn
            .execute("INSERT INTO projects (name) VALUES (?1)", [name])
        {
            Ok(_) => Ok(true),
            Err(e) if is_unique_violation(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Check whether a project with this exact name exists
    pub fn project_exists(&self, name: &str) -> Result<bool> {
        Ok(self.project_id(name)?.is_some())
    }

    /// Look up a project's row id by name
    pub fn project_id(&self, name: &str) -> Result<Option<i64>> {
        self.conn
            .query_row("SELECT id FROM projects WHERE name = ?1", [name], |row| {
                row.get(0)
            })
            .optional()
            .map_err(Into::into)
    }

    /// Find project names containing the given substring, alphabetically.
    /// Uses SQLite LIKE, so matching is case-insensitive for ASCII.
    pub fn search_projects(&self, query: &str) -> Result<Vec<String>> {
        let pattern = format!("%{}%", query);
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM projects WHERE name LIKE ?1 ORDER BY name")?;

        let names = stmt
            .query_map([pattern], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        Ok(names)
    }

    /// Delete a project and, via cascade, all of its subdomains. The single
    /// DELETE is atomic; FTS sync triggers fire for each cascaded row.
    /// Returns true iff a project row was removed.
    pub fn delete_project(&self, name: &str) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM projects WHERE name = ?1", [name])?;
        if changed > 0 {
            tracing::info!(project = name, "deleted project and its subdomains");
        }
        Ok(changed > 0)
    }

    // ========== Subdomain Operations ==========

    /// Add a single subdomain to a project, creating the project first if it
    /// does not exist yet. The name is trimmed; a blank name is rejected
    /// (false, without creating the project). Returns false if the
    /// (project, subdomain) pair is already stored.
    pub fn add_subdomain(&self, project: &str, subdomain: &str) -> Result<bool> {
        let subdomain = subdomain.trim();
        if subdomain.is_empty() {
            return Ok(false);
        }

        let project_id = self.ensure_project(project)?;

        match self.conn.execute(
            "INSERT INTO subdomains (project_id, name) VALUES (?1, ?2)",
            params![project_id, subdomain],
        ) {
            Ok(_) => Ok(true),
            Err(e) if is_unique_violation(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Bulk-add subdomains, classifying each as new or duplicate.
    ///
    /// Entries are trimmed; blank entries are skipped and counted in neither
    /// bucket. Each entry is checked against already-committed rows, so a
    /// value repeated within one batch counts as one new plus one duplicate.
    /// Individual duplicates never fail the batch.
    pub fn add_subdomains_bulk<I, S>(&self, project: &str, subdomains: I) -> Result<(usize, usize)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ensure_project(project)?;

        let mut new_count = 0;
        let mut duplicate_count = 0;
        for subdomain in subdomains {
            let subdomain = subdomain.as_ref().trim();
            if subdomain.is_empty() {
                continue;
            }
            if self.add_subdomain(project, subdomain)? {
                new_count += 1;
            } else {
                duplicate_count += 1;
            }
        }
        Ok((new_count, duplicate_count))
    }

    /// List a project's subdomains alphabetically; empty if the project
    /// does not exist
    pub fn subdomains(&self, project: &str) -> Result<Vec<String>> {
        let Some(project_id) = self.project_id(project)? else {
            return Ok(Vec::new());
        };

        let mut stmt = self
            .conn
            .prepare("SELECT name FROM subdomains WHERE project_id = ?1 ORDER BY name")?;

        let names = stmt
            .query_map([project_id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        Ok(names)
    }

    /// Count a project's subdomains; 0 if the project does not exist
    pub fn count_subdomains(&self, project: &str) -> Result<usize> {
        let Some(project_id) = self.project_id(project)? else {
            return Ok(0);
        };

        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM subdomains WHERE project_id = ?1",
            [project_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Full-text search over a project's subdomain names. The query uses
    /// FTS5 match-expression syntax (token matching), unlike the plain
    /// substring matching of [`search_projects`](Self::search_projects).
    /// Empty if the project does not exist; never returns rows from other
    /// projects.
    pub fn search_subdomains(&self, project: &str, query: &str) -> Result<Vec<String>> {
        let Some(project_id) = self.project_id(project)? else {
            return Ok(Vec::new());
        };

        let mut stmt = self.conn.prepare(
            r#"
            SELECT subdomains.name
            FROM subdomains_fts
            JOIN subdomains ON subdomains_fts.rowid = subdomains.id
            WHERE subdomains.project_id = ?1 AND subdomains_fts MATCH ?2
            ORDER BY subdomains.name
            "#,
        )?;

        let names = stmt
            .query_map(params![project_id, query], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        Ok(names)
    }

    /// Close the connection explicitly, surfacing any final error
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e.into())
    }

    /// Resolve a project's id, creating the project if needed
    /// (auto-vivification on first subdomain add)
    fn ensure_project(&self, name: &str) -> Result<i64> {
        if let Some(id) = self.project_id(name)? {
            return Ok(id);
        }
        tracing::debug!(project = name, "auto-creating project");
        self.add_project(name)?;
        // Re-read rather than trusting last_insert_rowid: another process may
        // have created the row between our check and insert.
        self.project_id(name)?.ok_or_else(|| {
            rusqlite::Error::QueryReturnedNoRows.into()
        })
    }
}

/// True when the error is specifically a UNIQUE constraint violation, which
/// the store translates into a boolean duplicate outcome. Other constraint
/// failures (e.g. foreign key) stay faults.
fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
