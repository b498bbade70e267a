//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the `tracing` subscriber used by the binary.
//! Log levels come from `RUST_LOG`; the format is compact and hides module
//! paths, since every event already carries `entity_type`, `index` or `id`
//! fields.
//!
//! ## What Gets Traced
//!
//! - **Store**: startup, every committed row, failed commits, shutdown
//! - **Facades**: construction and not-found lookups (`debug`)
//! - **Registry**: lookups for unregistered types (`warn`)
//! - **Reindex**: per-index progress (`info`)
//!
//! ```bash
//! RUST_LOG=info letters-archive db-reindex --indexes all
//! RUST_LOG=letters_archive::framework=debug letters-archive show language 1
//! ```
//!
//! With `RUST_LOG=info` a fixture run reads:
//!
//! ```text
//! INFO Store started version=0
//! INFO Committed entity_type=user_role id=1 size=1
//! INFO Committed entity_type=user id=1 size=1
//! INFO Committed entity_type=language id=1 size=1
//! ```

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
