//! # Store Errors
//!
//! Constraint violations raised while a transaction commits, plus the
//! channel failures of talking to the store actor.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("NOT NULL constraint failed: {table}.{column}")]
    NotNull {
        table: &'static str,
        column: &'static str,
    },

    #[error("value too long for {table}.{column} (max {max} characters)")]
    ValueTooLong {
        table: &'static str,
        column: &'static str,
        max: usize,
    },

    #[error("UNIQUE constraint failed: {table}.{column} ('{value}')")]
    Unique {
        table: &'static str,
        column: &'static str,
        value: String,
    },

    #[error("duplicate primary key {id} in {table}")]
    DuplicateKey { table: &'static str, id: u32 },

    #[error("no free primary key left in {table}")]
    IdsExhausted { table: &'static str },

    #[error("FOREIGN KEY constraint failed: {table}.{column} references missing {target} {id}")]
    ForeignKey {
        table: &'static str,
        column: &'static str,
        target: &'static str,
        id: u32,
    },

    #[error("Store actor closed")]
    ActorClosed,

    #[error("Store actor dropped response channel")]
    ActorDropped,
}
