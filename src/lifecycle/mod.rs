//! Runtime orchestration and the commands built on it.
//!
//! # Main Components
//!
//! - [`AppConfig`] - Profiles, TOML overrides and defaults
//! - [`AppContext`] - Owns the running store and the index sink; passed to every command
//! - [`reindex`](reindex::reindex) - Rebuilds search indexes from the store
//! - [`fixtures`] - Deterministic demo data
//! - [`show`](show::show) - One entity as a JSON:API document
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod app;
pub mod config;
pub mod fixtures;
pub mod reindex;
pub mod show;
pub mod tracing;

pub use app::*;
pub use config::*;
pub use reindex::{reindex, ReindexError, ReindexReport, DECLARED_INDEXES};
pub use show::{show, ShowError};
pub use tracing::*;
