//! # Search Index
//!
//! The write side of full-text search. Facades push their search resource to
//! an [`IndexSink`]; the sink is the only thing that talks to the search
//! backend. [`MemoryIndex`] keeps everything in memory and backs the tests and
//! the CLI.

pub mod memory;

pub use memory::MemoryIndex;

use crate::framework::ResourceObject;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("Index backend unavailable: {0}")]
    Unavailable(String),

    #[error("Unknown index operation '{0}'")]
    UnknownOperation(String),
}

/// What to do with a resource's index entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexOperation {
    Insert,
    Update,
    Delete,
}

impl IndexOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            IndexOperation::Insert => "insert",
            IndexOperation::Update => "update",
            IndexOperation::Delete => "delete",
        }
    }
}

impl fmt::Display for IndexOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexOperation {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insert" => Ok(IndexOperation::Insert),
            "update" => Ok(IndexOperation::Update),
            "delete" => Ok(IndexOperation::Delete),
            other => Err(IndexError::UnknownOperation(other.to_string())),
        }
    }
}

/// A search backend.
#[async_trait]
pub trait IndexSink: Send + Sync {
    /// Drops a whole index. Deleting an index that does not exist succeeds.
    async fn delete_index(&self, name: &str) -> Result<(), IndexError>;

    async fn index(
        &self,
        name: &str,
        operation: IndexOperation,
        resource: &ResourceObject,
    ) -> Result<(), IndexError>;
}
