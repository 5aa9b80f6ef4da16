// Kestrel Settings Store
// Durable key-value persistence for bookmarks, history and preference scalars.
// Rows live in the `settings` table under a fixed application namespace.
//
// Arrays are flattened the same way for every list:
//   bookmarks.size        -> number of records
//   bookmarks[0].title    -> field `title` of record 0
//   bookmarks[0].url      -> field `url` of record 0

use std::collections::BTreeMap;
use std::rc::Rc;

use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::types::errors::SettingsError;

/// One record of a stored array: field name to value.
pub type Record = BTreeMap<String, String>;

/// Key holding the element count of array `name`.
pub fn array_size_key(name: &str) -> String {
    format!("{}.size", name)
}

/// Key holding `field` of element `index` of array `name`.
pub fn array_field_key(name: &str, index: usize, field: &str) -> String {
    format!("{}[{}].{}", name, index, field)
}

/// Trait defining the key-value settings store interface.
pub trait SettingsStoreTrait {
    /// The application namespace every key is stored under.
    fn namespace(&self) -> &str;

    fn value(&self, key: &str) -> Result<Option<String>, SettingsError>;

    fn set_value(&self, key: &str, value: &str) -> Result<(), SettingsError>;

    /// Removes every key starting with `prefix`. Returns the number removed.
    fn remove_prefix(&self, prefix: &str) -> Result<usize, SettingsError>;

    /// Reads array `name`, returning one record per stored index in order.
    ///
    /// A missing count key reads as an empty array; a missing field reads as
    /// an empty string.
    fn read_array(&self, name: &str, fields: &[&str]) -> Result<Vec<Record>, SettingsError> {
        let size_key = array_size_key(name);
        let size = match self.value(&size_key)? {
            None => 0,
            Some(raw) => raw.parse::<usize>().map_err(|_| SettingsError::InvalidValue {
                key: size_key.clone(),
                value: raw,
            })?,
        };

        let mut records = Vec::with_capacity(size);
        for index in 0..size {
            let mut record = Record::new();
            for field in fields {
                let value = self
                    .value(&array_field_key(name, index, field))?
                    .unwrap_or_default();
                record.insert(field.to_string(), value);
            }
            records.push(record);
        }
        Ok(records)
    }

    /// Replaces array `name` with `records`, dropping any stale indexes.
    fn write_array(&self, name: &str, records: &[Record]) -> Result<(), SettingsError> {
        self.remove_prefix(&format!("{}[", name))?;
        self.set_value(&array_size_key(name), &records.len().to_string())?;
        for (index, record) in records.iter().enumerate() {
            for (field, value) in record {
                self.set_value(&array_field_key(name, index, field), value)?;
            }
        }
        Ok(())
    }
}

/// Settings store backed by the profile's SQLite database.
pub struct SqliteSettingsStore {
    db: Rc<Database>,
    namespace: String,
}

impl SqliteSettingsStore {
    /// Creates a store that reads and writes keys under `namespace`.
    pub fn new(db: Rc<Database>, namespace: &str) -> Self {
        Self {
            db,
            namespace: namespace.to_string(),
        }
    }

    fn insert(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.db.connection().execute(
            "INSERT INTO settings (namespace, key, value) VALUES (?1, ?2, ?3) \
             ON CONFLICT(namespace, key) DO UPDATE SET value = excluded.value",
            params![self.namespace, key, value],
        )?;
        Ok(())
    }

    fn delete_prefix(&self, prefix: &str) -> Result<usize, rusqlite::Error> {
        self.db.connection().execute(
            "DELETE FROM settings WHERE namespace = ?1 AND substr(key, 1, ?2) = ?3",
            params![self.namespace, prefix.chars().count() as i64, prefix],
        )
    }
}

impl SettingsStoreTrait for SqliteSettingsStore {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn value(&self, key: &str) -> Result<Option<String>, SettingsError> {
        let value = self
            .db
            .connection()
            .query_row(
                "SELECT value FROM settings WHERE namespace = ?1 AND key = ?2",
                params![self.namespace, key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_value(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.insert(key, value)?;
        Ok(())
    }

    fn remove_prefix(&self, prefix: &str) -> Result<usize, SettingsError> {
        Ok(self.delete_prefix(prefix)?)
    }

    /// Writes the whole array inside one transaction so a failed write
    /// leaves the previous list intact.
    fn write_array(&self, name: &str, records: &[Record]) -> Result<(), SettingsError> {
        let tx = self.db.connection().unchecked_transaction()?;
        self.delete_prefix(&format!("{}[", name))?;
        self.insert(&array_size_key(name), &records.len().to_string())?;
        for (index, record) in records.iter().enumerate() {
            for (field, value) in record {
                self.insert(&array_field_key(name, index, field), value)?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}
