//! In-memory [`IndexSink`].

use crate::framework::ResourceObject;
use crate::index::{IndexError, IndexOperation, IndexSink};
use crate::model::EntityId;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use tracing::debug;

/// Index name → id → serialized resource.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    indexes: Mutex<HashMap<String, BTreeMap<EntityId, Value>>>,
    deleted: Mutex<Vec<String>>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored entry of `id` in index `name`.
    pub fn get(&self, name: &str, id: EntityId) -> Option<Value> {
        self.lock_indexes().get(name)?.get(&id).cloned()
    }

    /// Number of entries in index `name`, zero when it does not exist.
    pub fn len(&self, name: &str) -> usize {
        self.lock_indexes().get(name).map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self, name: &str) -> bool {
        self.len(name) == 0
    }

    /// Names of the indexes holding at least one entry, sorted.
    pub fn index_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .lock_indexes()
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// Every `delete_index` call received, in order.
    pub fn deleted_indexes(&self) -> Vec<String> {
        self.deleted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn lock_indexes(&self) -> std::sync::MutexGuard<'_, HashMap<String, BTreeMap<EntityId, Value>>> {
        self.indexes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl IndexSink for MemoryIndex {
    async fn delete_index(&self, name: &str) -> Result<(), IndexError> {
        let existed = self.lock_indexes().remove(name).is_some();
        self.deleted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(name.to_string());
        debug!(index = name, existed, "Index deleted");
        Ok(())
    }

    async fn index(
        &self,
        name: &str,
        operation: IndexOperation,
        resource: &ResourceObject,
    ) -> Result<(), IndexError> {
        let mut indexes = self.lock_indexes();
        let entries = indexes.entry(name.to_string()).or_default();
        match operation {
            IndexOperation::Delete => {
                entries.remove(&resource.id);
            }
            IndexOperation::Insert | IndexOperation::Update => {
                let body = serde_json::to_value(resource)
                    .map_err(|e| IndexError::Unavailable(e.to_string()))?;
                entries.insert(resource.id, body);
            }
        }
        Ok(())
    }
}
