//! Store location parsing.
//!
//! The `--db` value selects the backend once, at startup. No environment
//! variable is consulted.

use std::error::Error;
use std::path::PathBuf;

use super::DbError;
use super::backend::DatabaseBackend;
use super::connection::{open_db, open_mem};

/// Default store location, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "./example.db";

/// Configuration for database backend selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    /// CozoDB with SQLite storage.
    Sqlite { path: PathBuf },

    /// CozoDB with in-memory storage.
    Mem,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::Sqlite {
            path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

impl DatabaseConfig {
    /// Create a backend instance from this configuration.
    pub fn connect(&self) -> Result<Box<dyn DatabaseBackend>, Box<dyn Error>> {
        let backend: Box<dyn DatabaseBackend> = match self {
            Self::Sqlite { path } => Box::new(open_db(path)?),
            Self::Mem => Box::new(open_mem()?),
        };
        Ok(backend)
    }

    /// Parse from a connection URL or file path.
    ///
    /// Supported formats:
    /// - `./path/to/db` or `/absolute/path` → Sqlite
    /// - `sqlite://path/to/db` → Sqlite
    /// - `:memory:` → Mem
    pub fn from_url(url: &str) -> Result<Self, Box<dyn Error>> {
        if url == ":memory:" {
            return Ok(Self::Mem);
        }

        if let Some(path) = url.strip_prefix("sqlite://") {
            if path.is_empty() {
                return Err(DbError::UnsupportedUrl {
                    url: url.to_string(),
                }
                .into());
            }
            return Ok(Self::Sqlite {
                path: PathBuf::from(path),
            });
        }

        if url.is_empty() || url.contains("://") {
            return Err(DbError::UnsupportedUrl {
                url: url.to_string(),
            }
            .into());
        }

        Ok(Self::Sqlite {
            path: PathBuf::from(url),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("./example.db", "./example.db")]
    #[case("/tmp/school.db", "/tmp/school.db")]
    #[case("sqlite://data/school.db", "data/school.db")]
    fn test_from_url_sqlite(#[case] url: &str, #[case] expected: &str) {
        let config = DatabaseConfig::from_url(url).unwrap();
        assert_eq!(
            config,
            DatabaseConfig::Sqlite {
                path: PathBuf::from(expected)
            }
        );
    }

    #[rstest]
    fn test_from_url_memory() {
        assert_eq!(DatabaseConfig::from_url(":memory:").unwrap(), DatabaseConfig::Mem);
    }

    #[rstest]
    #[case("")]
    #[case("sqlite://")]
    #[case("postgres://user@localhost/db")]
    fn test_from_url_rejects(#[case] url: &str) {
        let err = DatabaseConfig::from_url(url).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DbError>(),
            Some(DbError::UnsupportedUrl { .. })
        ));
    }

    #[rstest]
    fn test_default_is_example_db() {
        assert_eq!(
            DatabaseConfig::default(),
            DatabaseConfig::Sqlite {
                path: PathBuf::from(DEFAULT_DB_PATH)
            }
        );
    }

    #[rstest]
    fn test_connect_memory() {
        let backend = DatabaseConfig::Mem.connect().unwrap();
        assert_eq!(backend.backend_name(), "CozoMem");
    }
}
