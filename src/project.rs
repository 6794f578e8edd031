//! Project handle - binds a project name to store operations
//!
//! A [`Project`] owns no persistent state of its own; it borrows the store
//! and re-reads project existence from it on every operation. Bulk-import
//! orchestration and its new/duplicate accounting live here.

use std::fmt;

use crate::storage::SqliteStore;
use crate::Result;

/// Named-scope wrapper around [`SqliteStore`]
pub struct Project<'a> {
    store: &'a SqliteStore,
    name: String,
}

/// Accounting for one bulk import
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportReport {
    /// Non-blank entries processed (new + duplicates)
    pub total: usize,
    /// Entries stored for the first time
    pub new: usize,
    /// Entries already present for this project
    pub duplicates: usize,
    /// duplicates / total * 100, or 0.0 when nothing was processed
    pub duplicate_percentage: f64,
}

impl ImportReport {
    fn new(new: usize, duplicates: usize) -> Self {
        let total = new + duplicates;
        let duplicate_percentage = if total > 0 {
            duplicates as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Self {
            total,
            new,
            duplicates,
            duplicate_percentage,
        }
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total domains passed: {}", self.total)?;
        writeln!(
            f,
            "{} out of {} domains were duplicates ({:.2}%).",
            self.duplicates, self.total, self.duplicate_percentage
        )?;
        write!(f, "Total new domains added: {}", self.new)
    }
}

impl<'a> Project<'a> {
    pub fn new(store: &'a SqliteStore, name: impl Into<String>) -> Self {
        Self {
            store,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Import subdomains from raw lines (e.g. a newline-delimited file).
    /// Lines are trimmed and blank lines dropped before counting.
    pub fn import_lines<I, S>(&self, lines: I) -> Result<ImportReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (new, duplicates) = self.store.add_subdomains_bulk(&self.name, lines)?;
        Ok(ImportReport::new(new, duplicates))
    }

    /// Import subdomains from a comma-separated list. Returns None when no
    /// non-empty token survives splitting, so callers can report empty input
    /// instead of a meaningless 0/0 statistic.
    pub fn import_list(&self, list: &str) -> Result<Option<ImportReport>> {
        let tokens: Vec<&str> = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if tokens.is_empty() {
            return Ok(None);
        }
        self.import_lines(tokens).map(Some)
    }

    /// List this project's subdomains alphabetically
    pub fn domains(&self) -> Result<Vec<String>> {
        self.store.subdomains(&self.name)
    }

    /// Count this project's subdomains
    pub fn domain_count(&self) -> Result<usize> {
        self.store.count_subdomains(&self.name)
    }

    /// Whether this project exists in the store right now
    pub fn exists(&self) -> Result<bool> {
        self.store.project_exists(&self.name)
    }

    /// Delete this project and all its subdomains; true iff it existed
    pub fn delete(&self) -> Result<bool> {
        self.store.delete_project(&self.name)
    }

    /// Full-text search within this project's subdomains
    pub fn search_domains(&self, query: &str) -> Result<Vec<String>> {
        self.store.search_subdomains(&self.name, query)
    }

    /// Substring search across all project names, not scoped to this handle
    pub fn search_projects(&self, query: &str) -> Result<Vec<String>> {
        self.store.search_projects(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_lines_accounting() {
        let store = SqliteStore::open_in_memory().unwrap();
        let project = Project::new(&store, "acme");

        let report = project
            .import_lines(["x.acme.com", "y.acme.com", "x.acme.com"])
            .unwrap();
        assert_eq!(report.new, 2);
        assert_eq!(report.duplicates, 1);
        assert_eq!(report.total, 3);
        assert!((report.duplicate_percentage - 100.0 / 3.0).abs() < 0.01);
    }

    #[test]
    fn test_import_lines_empty_input_is_zero_percent() {
        let store = SqliteStore::open_in_memory().unwrap();
        let project = Project::new(&store, "acme");

        let report = project.import_lines(Vec::<String>::new()).unwrap();
        assert_eq!(report.total, 0);
        assert_eq!(report.duplicate_percentage, 0.0);
    }

    #[test]
    fn test_import_list_splits_on_commas() {
        let store = SqliteStore::open_in_memory().unwrap();
        let project = Project::new(&store, "acme");

        let report = project
            .import_list("a.acme.com, b.acme.com ,a.acme.com,,")
            .unwrap()
            .unwrap();
        assert_eq!(report.new, 2);
        assert_eq!(report.duplicates, 1);

        assert_eq!(project.domains().unwrap(), vec!["a.acme.com", "b.acme.com"]);
    }

    #[test]
    fn test_import_list_rejects_empty_input() {
        let store = SqliteStore::open_in_memory().unwrap();
        let project = Project::new(&store, "acme");

        assert!(project.import_list("").unwrap().is_none());
        assert!(project.import_list(" , ,, ").unwrap().is_none());
        // No project vivified for empty input
        assert!(!project.exists().unwrap());
    }

    #[test]
    fn test_report_display_two_decimals() {
        let report = ImportReport::new(2, 1);
        let rendered = report.to_string();
        assert!(rendered.contains("1 out of 3 domains were duplicates (33.33%)."));
        assert!(rendered.contains("Total new domains added: 2"));
    }

    #[test]
    fn test_search_projects_passthrough() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.add_project("foobar").unwrap();
        store.add_project("cool").unwrap();
        store.add_project("abc").unwrap();

        let project = Project::new(&store, "");
        assert_eq!(
            project.search_projects("oo").unwrap(),
            vec!["cool", "foobar"]
        );
    }

    #[test]
    fn test_end_to_end_scenario() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.add_project("acme").unwrap());

        let project = Project::new(&store, "acme");
        let report = project
            .import_lines(["x.acme.com", "y.acme.com", "x.acme.com"])
            .unwrap();
        assert_eq!((report.new, report.duplicates), (2, 1));
        assert!((report.duplicate_percentage - 33.33).abs() < 0.01);

        assert_eq!(project.domains().unwrap(), vec!["x.acme.com", "y.acme.com"]);
        assert_eq!(project.domain_count().unwrap(), 2);
        assert!(project.delete().unwrap());
        assert!(project.domains().unwrap().is_empty());
    }
}
