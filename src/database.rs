//! Handle to the on-disk SQLite store.
//!
//! No connection is kept between calls. Every operation opens the file, runs
//! its statements and drops the connection again, so isolation and durability
//! are whatever SQLite's defaults provide.

use rusqlite::{Connection, Transaction};
use std::path::{Path, PathBuf};

use crate::error::{CityMapError, Result};
use crate::logger::Log;

#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `f` on a fresh autocommit connection.
    pub fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = self.open()?;
        f(&conn).map_err(|source| self.storage_error(source))
    }

    /// Run `f` inside a single transaction, committing when it succeeds.
    ///
    /// A failed `f` rolls the transaction back when it is dropped.
    pub fn with_transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> rusqlite::Result<T>,
    {
        let mut conn = self.open()?;
        let run = |conn: &mut Connection| -> rusqlite::Result<T> {
            let tx = conn.transaction()?;
            let value = f(&tx)?;
            tx.commit()?;
            Ok(value)
        };
        run(&mut conn).map_err(|source| self.storage_error(source))
    }

    fn open(&self) -> Result<Connection> {
        Log::log_debug(&format!("Opening database {}", self.path.display()));
        Connection::open(&self.path).map_err(|source| self.storage_error(source))
    }

    fn storage_error(&self, source: rusqlite::Error) -> CityMapError {
        CityMapError::Storage {
            path: self.path.clone(),
            source,
        }
    }
}
