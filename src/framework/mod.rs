//! Generic resource-facade layer.
//!
//! This module turns persisted entities into JSON:API resources, the same way
//! for every entity type.
//!
//! # Main Components
//!
//! - [`ResourceFacade`] - Trait each entity type implements once to describe itself
//! - [`Facade`] - One entity rendered for one request, with relationship getters
//! - [`FacadeClass`] / [`FacadeRegistry`] - `(type, purpose)` → facade lookup
//! - [`included`] - Breadth-first compound-document walk
//! - [`document`] - JSON:API wire types
//!
//! # Testing
//!
//! Facades only need a [`Snapshot`](crate::store::Snapshot), so tests build one
//! in memory. The write path is tested against
//! [`MockStore`](crate::store::mock::MockStore).

pub mod document;
pub mod facade;
pub mod include;
pub mod registry;

pub use document::*;
pub use facade::*;
pub use include::included;
pub use registry::*;
