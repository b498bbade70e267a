//! # Letters Archive
//!
//! JSON:API resource facades over the tables of a scholarly letters archive.
//!
//! Every persisted entity (documents, their witnesses and notes, languages,
//! collections, persons, users, ...) is exposed through a *facade*: a
//! short-lived wrapper that renders the entity as a JSON:API resource with
//! links, relationship linkage and compound documents, and that can push
//! itself to a search index.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic part. [`ResourceFacade`](framework::ResourceFacade) is
//! implemented once per entity type; [`Facade`](framework::Facade) does the
//! rendering for all of them; the [`FacadeRegistry`](framework::FacadeRegistry)
//! picks a facade class from a row's table and a purpose (`default` or
//! `search`).
//!
//! ### 2. The Facades ([`facades`])
//! One facade per exposed table, plus the search flavour of documents.
//!
//! ### 3. The Data ([`model`], [`store`])
//! Plain structs per table, kept in an arena [`Snapshot`](store::Snapshot)
//! owned by the [`StoreActor`](store::StoreActor). Writes are transactions
//! that commit completely or not at all.
//!
//! ### 4. Search ([`index`])
//! The [`IndexSink`](index::IndexSink) seam and an in-memory implementation.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! Configuration, the [`AppContext`](lifecycle::AppContext) handed to every
//! command, reindexing, fixtures and tracing setup.
//!
//! ## Quick Start
//!
//! ```rust
//! use letters_archive::facades::LanguageFacade;
//! use letters_archive::framework::{FacadeContext, ResourceFacade};
//! use letters_archive::model::RelatedResources;
//! use letters_archive::store::{Snapshot, StoreActor};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, store) = StoreActor::new(8, Snapshot::new());
//!     tokio::spawn(actor.run());
//!
//!     let attributes = json!({"code": "fra", "label": "Français"});
//!     let language = LanguageFacade::create_resource(
//!         &store,
//!         None,
//!         attributes.as_object().unwrap(),
//!         &RelatedResources::new(),
//!     )
//!     .await
//!     .unwrap();
//!
//!     let snapshot = store.snapshot().await.unwrap();
//!     let context = FacadeContext::new("/api/1.0");
//!     let (facade, _, _) = LanguageFacade::get_resource_facade(&snapshot, &context, language.id);
//!     assert_eq!(facade.unwrap().self_link(), "/api/1.0/languages/1");
//! }
//! ```
//!
//! ### Running the CLI
//!
//! ```bash
//! RUST_LOG=info cargo run -- db-fixtures --out fixtures.json
//! cargo run -- --data fixtures.json show document 2 --include
//! cargo run -- --data fixtures.json db-reindex --indexes languages,documents --host http://localhost:5000
//! ```

pub mod facades;
pub mod framework;
pub mod index;
pub mod lifecycle;
pub mod model;
pub mod store;
