//! # Store Client
//!
//! Cheap-to-clone handle on the [`StoreActor`](crate::store::StoreActor).

use crate::model::{EntityId, Model, Record};
use crate::store::{Snapshot, StoreError, StoreRequest, Transaction};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

#[derive(Clone)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl StoreClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    /// The latest committed snapshot.
    pub async fn snapshot(&self) -> Result<Arc<Snapshot>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Snapshot { respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn lookup<M: Model>(&self, id: EntityId) -> Result<Option<M>, StoreError> {
        Ok(self.snapshot().await?.get::<M>(id).cloned())
    }

    pub async fn scan<M: Model>(&self) -> Result<Vec<M>, StoreError> {
        Ok(self.snapshot().await?.scan::<M>().cloned().collect())
    }

    pub fn begin(&self) -> Transaction {
        Transaction::new()
    }

    /// Commits every staged row or none of them. Returns the committed rows
    /// with their assigned ids.
    pub async fn commit(&self, transaction: Transaction) -> Result<Vec<Record>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Commit {
                transaction,
                respond_to,
            })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }
}
