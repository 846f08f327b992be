//! Persisted field model
//!
//! One row per calculator input, keyed by field name.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// The last value written for a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedField {
    pub key: String,
    pub value: String,
    pub updated_at: String,
}

impl PersistedField {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            key: row.get("key")?,
            value: row.get("value")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Get a field by key
    pub fn get(conn: &Connection, key: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM fields WHERE key = ?1")?;

        let result = stmt.query_row([key], Self::from_row);
        match result {
            Ok(field) => Ok(Some(field)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write a field value (upsert)
    pub fn set(conn: &Connection, key: &str, value: &str) -> DbResult<()> {
        conn.execute(
            r#"
            INSERT INTO fields (key, value)
            VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = datetime('now')
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// List all fields ordered by key
    pub fn list(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM fields ORDER BY key")?;
        let fields = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(fields)
    }
}
