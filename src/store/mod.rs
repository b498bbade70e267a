//! Entity store: an actor-owned arena of tables with snapshot reads and
//! commit-or-rollback writes.
//!
//! - [`StoreActor`] owns the tables and serializes commits.
//! - [`StoreClient`] is the handle the rest of the crate talks to.
//! - [`Snapshot`] is the immutable view facades borrow from.
//!
//! See [`mock`] for a scripted client used to simulate store failures in tests.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod snapshot;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use error::StoreError;
pub use message::{Response, StoreRequest, Transaction};
pub use snapshot::Snapshot;
