//! Field store backends

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::db::{Database, DbError};
use crate::models::PersistedField;

/// Field store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    #[error("Store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Async string key-value store
#[async_trait]
pub trait FieldStore: Send + Sync {
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Every stored field, ordered by key
    async fn list(&self) -> StoreResult<Vec<PersistedField>>;
}

/// SQLite-backed store; queries run on the blocking pool
#[derive(Clone)]
pub struct SqliteFieldStore {
    database: Database,
}

impl SqliteFieldStore {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    async fn run<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> crate::db::DbResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let database = self.database.clone();
        let result = tokio::task::spawn_blocking(move || database.with_conn(f)).await?;
        Ok(result?)
    }
}

#[async_trait]
impl FieldStore for SqliteFieldStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let key = key.to_string();
        let field = self.run(move |conn| PersistedField::get(conn, &key)).await?;
        Ok(field.map(|f| f.value))
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let key = key.to_string();
        let value = value.to_string();
        self.run(move |conn| PersistedField::set(conn, &key, &value))
            .await
    }

    async fn list(&self) -> StoreResult<Vec<PersistedField>> {
        self.run(PersistedField::list).await
    }
}

/// Process-local store; nothing survives a restart
#[derive(Default)]
pub struct MemoryFieldStore {
    fields: RwLock<HashMap<String, PersistedField>>,
}

impl MemoryFieldStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FieldStore for MemoryFieldStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let fields = self.fields.read().await;
        Ok(fields.get(key).map(|f| f.value.clone()))
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let field = PersistedField {
            key: key.to_string(),
            value: value.to_string(),
            updated_at: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };
        self.fields.write().await.insert(key.to_string(), field);
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<PersistedField>> {
        let fields = self.fields.read().await;
        let mut all: Vec<PersistedField> = fields.values().cloned().collect();
        all.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(all)
    }
}
