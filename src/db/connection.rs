//! Database connection management.

use std::error::Error;
use std::path::Path;

use cozo::DbInstance;
use tracing::info;

use super::DbError;
use super::backend::CozoBackend;

/// Open a CozoDB database backed by SQLite storage.
pub fn open_db(path: &Path) -> Result<CozoBackend, Box<dyn Error>> {
    let db = DbInstance::new("sqlite", path, "").map_err(|e| {
        Box::new(DbError::OpenFailed {
            path: path.display().to_string(),
            message: format!("{:?}", e),
        }) as Box<dyn Error>
    })?;
    info!(path = %path.display(), "opened sqlite store");
    Ok(CozoBackend::new(db, "sqlite"))
}

/// Open an in-memory database.
pub fn open_mem() -> Result<CozoBackend, Box<dyn Error>> {
    let db = DbInstance::new("mem", "", "").map_err(|e| {
        Box::new(DbError::OpenFailed {
            path: ":memory:".to_string(),
            message: format!("{:?}", e),
        }) as Box<dyn Error>
    })?;
    Ok(CozoBackend::new(db, "mem"))
}

/// Create an in-memory database instance.
///
/// Used for tests to avoid disk I/O and temp file management.
#[cfg(test)]
pub fn open_mem_db() -> CozoBackend {
    open_mem().expect("Failed to create in-memory DB")
}
