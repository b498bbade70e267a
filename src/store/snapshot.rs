//! # Snapshot
//!
//! The arena holding every table at one committed version. Readers share it
//! behind an `Arc`; the store actor clones it to stage a transaction and swaps
//! the clone in once every constraint holds.

use crate::model::{EntityId, Model, Record, TypeTag};
use crate::store::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    version: u64,
    #[serde(default)]
    tables: BTreeMap<TypeTag, BTreeMap<EntityId, Record>>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of commits applied since the store was created or loaded.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Point lookup by primary key.
    pub fn lookup(&self, tag: TypeTag, id: EntityId) -> Option<&Record> {
        self.tables.get(&tag)?.get(&id)
    }

    pub fn get<M: Model>(&self, id: EntityId) -> Option<&M> {
        self.lookup(M::TAG, id).and_then(M::from_record)
    }

    /// Full scan of one table, in primary key order.
    pub fn scan_records(&self, tag: TypeTag) -> impl Iterator<Item = &Record> + '_ {
        self.tables.get(&tag).into_iter().flat_map(|rows| rows.values())
    }

    pub fn scan<M: Model>(&self) -> impl Iterator<Item = &M> + '_ {
        self.scan_records(M::TAG).filter_map(M::from_record)
    }

    pub fn count(&self, tag: TypeTag) -> usize {
        self.tables.get(&tag).map_or(0, BTreeMap::len)
    }

    /// Stages a row, handing out the next id of its table when the record has none.
    pub(crate) fn insert(&mut self, mut record: Record) -> Result<(TypeTag, EntityId), StoreError> {
        let tag = record.tag();
        let rows = self.tables.entry(tag).or_default();
        let id = match record.id() {
            0 => match rows.keys().next_back() {
                None => 1,
                Some(last) => last
                    .checked_add(1)
                    .ok_or(StoreError::IdsExhausted { table: tag.as_str() })?,
            },
            id if rows.contains_key(&id) => {
                return Err(StoreError::DuplicateKey {
                    table: tag.as_str(),
                    id,
                })
            }
            id => id,
        };
        record.assign_id(id);
        rows.insert(id, record);
        Ok((tag, id))
    }

    pub(crate) fn bump_version(&mut self) {
        self.version += 1;
    }
}
