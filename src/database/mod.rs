//! Kestrel profile database.
//!
//! A single SQLite file per profile. The settings store in
//! [`crate::services::settings_store`] is its only reader and writer.
//!
//! ```no_run
//! use kestrel::database::Database;
//!
//! let db = Database::open("kestrel.db")?;
//! let rows: i64 = db
//!     .connection()
//!     .query_row("SELECT COUNT(*) FROM settings", [], |row| row.get(0))?;
//! # Ok::<(), rusqlite::Error>(())
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
