//! # Scripted Store for Tests
//!
//! [`MockStore`] hands out a real [`StoreClient`] whose requests are answered
//! from a queue of expectations instead of a [`StoreActor`](crate::store::StoreActor).
//! It makes failures that are hard to provoke with real tables (a store that
//! went away mid-request, a commit rejected for an unusual reason) one line
//! of setup.
//!
//! | | MockStore | StoreActor |
//! |---|---|---|
//! | **State** | none, answers are scripted | real tables |
//! | **Use case** | code *around* the store (write path, error mapping) | the store itself, full flows |
//! | **Error injection** | `return_err` | needs crafted data |
//!
//! ```rust
//! use letters_archive::store::mock::MockStore;
//! use letters_archive::store::StoreError;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockStore::new();
//!     mock.expect_commit().return_err(StoreError::ActorDropped);
//!
//!     let client = mock.client();
//!     let result = client.commit(client.begin()).await;
//!     assert_eq!(result.unwrap_err(), StoreError::ActorDropped);
//!     mock.verify();
//! }
//! ```

use crate::model::Record;
use crate::store::{Snapshot, StoreClient, StoreError, StoreRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

enum Expectation {
    Snapshot {
        response: Result<Arc<Snapshot>, StoreError>,
    },
    Commit {
        response: Result<Vec<Record>, StoreError>,
    },
}

type Expectations = Arc<Mutex<VecDeque<Expectation>>>;

/// A store client with expectation tracking.
pub struct MockStore {
    client: StoreClient,
    expectations: Expectations,
    _handle: tokio::task::JoinHandle<()>,
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStore {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest>(100);
        let expectations: Expectations = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        StoreRequest::Snapshot { respond_to },
                        Some(Expectation::Snapshot { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Commit {
                            transaction: _,
                            respond_to,
                        },
                        Some(Expectation::Commit { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected store request or expectation mismatch: {request:?}");
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    pub fn client(&self) -> StoreClient {
        self.client.clone()
    }

    pub fn expect_snapshot(&mut self) -> SnapshotExpectationBuilder {
        SnapshotExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_commit(&mut self) -> CommitExpectationBuilder {
        CommitExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

pub struct SnapshotExpectationBuilder {
    expectations: Expectations,
}

impl SnapshotExpectationBuilder {
    pub fn return_ok(self, snapshot: Snapshot) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Snapshot {
                response: Ok(Arc::new(snapshot)),
            });
    }

    pub fn return_err(self, error: StoreError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Snapshot {
                response: Err(error),
            });
    }
}

pub struct CommitExpectationBuilder {
    expectations: Expectations,
}

impl CommitExpectationBuilder {
    pub fn return_ok(self, committed: Vec<Record>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Commit {
                response: Ok(committed),
            });
    }

    pub fn return_err(self, error: StoreError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Commit {
                response: Err(error),
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Language, Model, TypeTag};

    #[tokio::test]
    async fn test_mock_store_with_expectations() {
        let mut mock = MockStore::new();
        mock.expect_snapshot().return_ok(Snapshot::new());
        let mut lang = Language::new("fra", "Français");
        lang.id = 3;
        mock.expect_commit().return_ok(vec![lang.into_record()]);

        let client = mock.client();
        let snapshot = client.snapshot().await.unwrap();
        assert_eq!(snapshot.count(TypeTag::Language), 0);

        let committed = client.commit(client.begin()).await.unwrap();
        assert_eq!(committed[0].id(), 3);

        mock.verify();
    }
}
