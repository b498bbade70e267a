//! # Store Actor
//!
//! The server half of the entity store. It owns the current [`Snapshot`] and
//! processes requests one at a time, so commits never race each other and no
//! lock guards the tables.

use crate::model::Record;
use crate::store::{Snapshot, StoreClient, StoreError, StoreRequest, Transaction};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Actor owning the tables of the archive.
///
/// A commit is applied to a copy-on-write clone of the snapshot:
///
/// 1. every staged row is inserted (ids handed out for rows without one),
/// 2. the constraints of every inserted row are checked against the clone,
/// 3. on success the clone becomes the published snapshot, otherwise it is
///    dropped and the error is returned (rollback).
///
/// Readers holding an older `Arc<Snapshot>` keep seeing that version.
pub struct StoreActor {
    receiver: mpsc::Receiver<StoreRequest>,
    snapshot: Arc<Snapshot>,
}

impl StoreActor {
    /// Creates the actor over `snapshot` and the client used to reach it.
    ///
    /// `buffer_size` is the channel capacity; clients wait when it is full.
    pub fn new(buffer_size: usize, snapshot: Snapshot) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            snapshot: Arc::new(snapshot),
        };
        (actor, StoreClient::new(sender))
    }

    /// Runs the event loop until every client is dropped.
    pub async fn run(mut self) {
        info!(version = self.snapshot.version(), "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Snapshot { respond_to } => {
                    debug!(version = self.snapshot.version(), "Snapshot");
                    let _ = respond_to.send(Ok(Arc::clone(&self.snapshot)));
                }
                StoreRequest::Commit {
                    transaction,
                    respond_to,
                } => {
                    debug!(staged = transaction.len(), "Commit");
                    match apply(&self.snapshot, transaction) {
                        Ok((staged, committed)) => {
                            self.snapshot = Arc::new(staged);
                            for record in &committed {
                                info!(
                                    entity_type = %record.tag(),
                                    id = record.id(),
                                    size = self.snapshot.count(record.tag()),
                                    "Committed"
                                );
                            }
                            let _ = respond_to.send(Ok(committed));
                        }
                        Err(e) => {
                            warn!(error = %e, "Commit failed, rolled back");
                            let _ = respond_to.send(Err(e));
                        }
                    }
                }
            }
        }

        info!(version = self.snapshot.version(), "Shutdown");
    }
}

fn apply(current: &Snapshot, transaction: Transaction) -> Result<(Snapshot, Vec<Record>), StoreError> {
    let mut staged = current.clone();
    let mut keys = Vec::with_capacity(transaction.len());
    for record in transaction.into_records() {
        keys.push(staged.insert(record)?);
    }

    let mut committed = Vec::with_capacity(keys.len());
    for (tag, id) in keys {
        if let Some(record) = staged.lookup(tag, id) {
            record.check_constraints(&staged)?;
            committed.push(record.clone());
        }
    }

    staged.bump_version();
    Ok((staged, committed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Document, Language, TypeTag, User, UserRole};

    #[tokio::test]
    async fn test_commit_publishes_new_snapshot() {
        let (actor, client) = StoreActor::new(8, Snapshot::new());
        let handle = tokio::spawn(actor.run());

        let before = client.snapshot().await.unwrap();

        let mut tx = client.begin();
        tx.add(Language::new("fra", "Français"));
        let committed = client.commit(tx).await.unwrap();
        assert_eq!(committed.len(), 1);
        assert_eq!(committed[0].id(), 1);

        let after = client.snapshot().await.unwrap();
        assert_eq!(before.count(TypeTag::Language), 0);
        assert_eq!(after.count(TypeTag::Language), 1);
        assert_eq!(after.version(), before.version() + 1);

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_commit_leaves_tables_untouched() {
        let (actor, client) = StoreActor::new(8, Snapshot::new());
        tokio::spawn(actor.run());

        let mut tx = client.begin();
        tx.add(UserRole::new("admin", "Administrator"));
        tx.add(Language::new("fra", "Français"));
        // owner 42 does not exist
        tx.add(Document::new("Lettre", 42));
        let err = client.commit(tx).await.unwrap_err();
        assert!(matches!(err, StoreError::ForeignKey { column: "owner_id", .. }));

        let snapshot = client.snapshot().await.unwrap();
        assert_eq!(snapshot.count(TypeTag::UserRole), 0);
        assert_eq!(snapshot.count(TypeTag::Language), 0);
        assert_eq!(snapshot.version(), 0);
    }

    #[tokio::test]
    async fn test_rows_of_one_transaction_see_each_other() {
        let (actor, client) = StoreActor::new(8, Snapshot::new());
        tokio::spawn(actor.run());

        let mut tx = client.begin();
        tx.add(UserRole::new("admin", "Administrator"));
        tx.add(User {
            username: Some("admin".into()),
            email: Some("admin@example.com".into()),
            role_id: Some(1),
            ..User::default()
        });
        client.commit(tx).await.unwrap();

        let users = client.scan::<User>().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role_id, Some(1));
    }

    #[tokio::test]
    async fn test_exhausted_ids_roll_back_and_keep_serving() {
        let (actor, client) = StoreActor::new(8, Snapshot::new());
        tokio::spawn(actor.run());

        let mut last = Language::new("fra", "Français");
        last.id = u32::MAX;
        let mut tx = client.begin();
        tx.add(last);
        client.commit(tx).await.unwrap();

        let mut tx = client.begin();
        tx.add(Language::new("lat", "Latin"));
        let err = client.commit(tx).await.unwrap_err();
        assert_eq!(err, StoreError::IdsExhausted { table: "language" });

        let snapshot = client.snapshot().await.unwrap();
        assert_eq!(snapshot.count(TypeTag::Language), 1);
        assert_eq!(snapshot.version(), 1);
    }
}
