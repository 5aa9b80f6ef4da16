//! Profile schema upgrades.
//!
//! Applied versions are listed in `schema_version`; `run_all` applies the
//! missing ones in order on every open.

use rusqlite::{params, Connection};

pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Upgrades in order: version, description, statements.
const MIGRATIONS: &[(i32, &str, &str)] = &[(
    1,
    "Key-value settings table",
    "CREATE TABLE IF NOT EXISTS settings (
         namespace TEXT NOT NULL,
         key TEXT NOT NULL,
         value TEXT NOT NULL,
         PRIMARY KEY (namespace, key)
     );",
)];

/// Highest applied version; 0 for a fresh file.
pub fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .unwrap_or(0)
}

pub fn run_all(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         CREATE TABLE IF NOT EXISTS schema_version (
             version INTEGER PRIMARY KEY,
             applied_at INTEGER NOT NULL,
             description TEXT NOT NULL
         );",
    )?;

    let current = get_schema_version(conn);
    for (version, description, statements) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(statements)?;
        tx.execute(
            "INSERT OR IGNORE INTO schema_version (version, applied_at, description)
             VALUES (?1, strftime('%s', 'now'), ?2)",
            params![version, description],
        )?;
        tx.commit()?;
    }
    Ok(())
}
