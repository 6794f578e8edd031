//! Optional config file support
//!
//! A `bountycatch.toml` in the working directory may set a default database
//! path. The `--db` flag always wins over the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Default database filename in the working directory
pub const DEFAULT_DB_FILE: &str = "bountycatch.db";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BountycatchConfig {
    pub database: Option<PathBuf>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("bountycatch.toml")
}

pub fn load_config(path: Option<&Path>) -> Result<Option<BountycatchConfig>> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: BountycatchConfig =
        toml::from_str(&contents).map_err(|e| Error::Config(e.to_string()))?;
    Ok(Some(config))
}

/// Resolve the database path: explicit flag, then config file, then default
pub fn resolve_db_path(flag: Option<PathBuf>, config: Option<&BountycatchConfig>) -> PathBuf {
    flag.or_else(|| config.and_then(|c| c.database.clone()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
}

pub fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins_over_config() {
        let config = BountycatchConfig {
            database: Some(PathBuf::from("from-config.db")),
        };
        let resolved = resolve_db_path(Some(PathBuf::from("from-flag.db")), Some(&config));
        assert_eq!(resolved, PathBuf::from("from-flag.db"));
    }

    #[test]
    fn test_config_wins_over_default() {
        let config = BountycatchConfig {
            database: Some(PathBuf::from("from-config.db")),
        };
        assert_eq!(
            resolve_db_path(None, Some(&config)),
            PathBuf::from("from-config.db")
        );
        assert_eq!(
            resolve_db_path(None, None),
            PathBuf::from(DEFAULT_DB_FILE)
        );
    }

    #[test]
    fn test_load_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bountycatch.toml");
        std::fs::write(&path, "database = \"targets/acme.db\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(config.database, Some(PathBuf::from("targets/acme.db")));

        let missing = dir.path().join("nope.toml");
        assert!(load_config(Some(&missing)).unwrap().is_none());
    }
}
