//! Database schema definitions

/// SQL to create the projects table
pub const CREATE_PROJECTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS projects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT UNIQUE NOT NULL
)
"#;

/// SQL to create the subdomains table
/// A subdomain name is unique within its project but may repeat across projects
pub const CREATE_SUBDOMAINS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS subdomains (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    UNIQUE(project_id, name),
    FOREIGN KEY (project_id) REFERENCES projects(id) ON DELETE CASCADE
)
"#;

/// SQL to create the FTS5 index over subdomain names.
/// External-content table: the subdomains table stays the source of truth and
/// the index is rebuildable from it.
pub const CREATE_SUBDOMAINS_FTS: &str = r#"
CREATE VIRTUAL TABLE IF NOT EXISTS subdomains_fts
USING fts5(name, content='subdomains', content_rowid='id')
"#;

/// Triggers keeping the FTS index synchronized with the subdomains table.
/// External-content FTS5 requires the 'delete' command form on delete/update,
/// carrying the old values, so the index never holds stale entries.
pub const CREATE_FTS_SYNC_TRIGGERS: &[&str] = &[
    r#"
    CREATE TRIGGER IF NOT EXISTS subdomains_ai AFTER INSERT ON subdomains BEGIN
        INSERT INTO subdomains_fts(rowid, name) VALUES (new.id, new.name);
    END
    "#,
    r#"
    CREATE TRIGGER IF NOT EXISTS subdomains_ad AFTER DELETE ON subdomains BEGIN
        INSERT INTO subdomains_fts(subdomains_fts, rowid, name) VALUES ('delete', old.id, old.name);
    END
    "#,
    r#"
    CREATE TRIGGER IF NOT EXISTS subdomains_au AFTER UPDATE ON subdomains BEGIN
        INSERT INTO subdomains_fts(subdomains_fts, rowid, name) VALUES ('delete', old.id, old.name);
        INSERT INTO subdomains_fts(rowid, name) VALUES (new.id, new.name);
    END
    "#,
];

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_subdomains_project ON subdomains(project_id)",
];

/// All schema creation statements, idempotent and safe to replay on an
/// already-initialized database
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_PROJECTS_TABLE,
        CREATE_SUBDOMAINS_TABLE,
        CREATE_SUBDOMAINS_FTS,
    ];
    stmts.extend(CREATE_FTS_SYNC_TRIGGERS.iter().copied());
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
