//! Write-through and batch-read policy
//!
//! Writes are fire-and-forget: a failed write is logged and dropped, never
//! retried, and never reported to the caller. Reads for a form are issued
//! together and a failed read counts as "nothing saved".

use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::{JoinHandle, JoinSet};

use super::field_store::FieldStore;

#[derive(Clone)]
pub struct FieldPersistence {
    store: Arc<dyn FieldStore>,
}

impl FieldPersistence {
    pub fn new(store: Arc<dyn FieldStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn FieldStore> {
        &self.store
    }

    /// Persist a value in the background
    ///
    /// Must be called from within a tokio runtime. The handle only exists so
    /// callers that care (tests, shutdown) can wait; nothing else should.
    pub fn write_through(&self, key: &str, value: &str) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let key = key.to_string();
        let value = value.to_string();
        tokio::spawn(async move {
            match store.set(&key, &value).await {
                Ok(()) => tracing::debug!(key = %key, "Field saved"),
                Err(e) => tracing::warn!(key = %key, error = %e, "Error saving field"),
            }
        })
    }

    /// Read every key concurrently
    ///
    /// Keys that are absent, empty, or fail to load are left out of the map.
    pub async fn load(&self, keys: &[&str]) -> HashMap<String, String> {
        let mut reads = JoinSet::new();
        for key in keys {
            let store = Arc::clone(&self.store);
            let key = key.to_string();
            reads.spawn(async move {
                let value = store.get(&key).await;
                (key, value)
            });
        }

        let mut saved = HashMap::new();
        while let Some(joined) = reads.join_next().await {
            match joined {
                Ok((key, Ok(Some(value)))) if !value.is_empty() => {
                    saved.insert(key, value);
                }
                Ok((_, Ok(_))) => {}
                Ok((key, Err(e))) => {
                    tracing::warn!(key = %key, error = %e, "Error loading saved field");
                }
                Err(e) => tracing::warn!(error = %e, "Field read task failed"),
            }
        }
        saved
    }
}
