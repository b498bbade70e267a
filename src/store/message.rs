//! # Store Messages
//!
//! Requests the [`StoreClient`](crate::store::StoreClient) sends to the
//! [`StoreActor`](crate::store::StoreActor), and the transaction they carry.

use crate::model::{Model, Record};
use crate::store::{Snapshot, StoreError};
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::debug;

/// One-shot response channel used by the store actor.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum StoreRequest {
    Snapshot {
        respond_to: Response<Arc<Snapshot>>,
    },
    Commit {
        transaction: Transaction,
        respond_to: Response<Vec<Record>>,
    },
}

/// Rows staged for a single commit-or-rollback unit.
///
/// Nothing reaches the store until [`StoreClient::commit`](crate::store::StoreClient::commit)
/// is called; a transaction that fails to commit leaves the store untouched.
#[derive(Debug, Default)]
pub struct Transaction {
    records: Vec<Record>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<M: Model>(&mut self, row: M) {
        self.records.push(row.into_record());
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Discards every staged row.
    pub fn rollback(self) {
        debug!(staged = self.records.len(), "Rolled back");
    }

    pub(crate) fn into_records(self) -> Vec<Record> {
        self.records
    }
}
