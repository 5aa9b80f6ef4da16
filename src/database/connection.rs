//! The profile's SQLite handle.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::Connection;
use tracing::debug;

use super::migrations;

/// How long a write waits on a lock held by another Kestrel process using
/// the same profile.
const BUSY_TIMEOUT: Duration = Duration::from_secs(2);

/// A migrated connection to `kestrel.db`, or to a private in-memory copy.
pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    /// Opens the profile database at `path`, creating the file on first use.
    ///
    /// # Errors
    /// Fails when the file cannot be opened or the schema cannot be brought
    /// up to date.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Self::prepare(conn, Some(path.to_path_buf()))
    }

    /// A database that lives only as long as the returned value.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::prepare(Connection::open_in_memory()?, None)
    }

    fn prepare(conn: Connection, path: Option<PathBuf>) -> Result<Self, rusqlite::Error> {
        migrations::run_all(&conn)?;
        debug!(
            "profile schema at version {}",
            migrations::get_schema_version(&conn)
        );
        Ok(Self { conn, path })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// The backing file; `None` for in-memory profiles.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
