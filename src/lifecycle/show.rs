//! The `show` command: one entity as a JSON:API document.

use crate::framework::{included, registry, Document, Purpose, RegistryError};
use crate::lifecycle::AppContext;
use crate::model::EntityId;
use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShowError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Renders entity `id` of `type_name` with relationship links and linkage.
///
/// `type_name` is either the table (`person_role`) or the resource type
/// (`person-role`). A missing entity yields the 404 error document; an
/// unregistered type is an error.
pub async fn show(
    app: &AppContext,
    type_name: &str,
    id: EntityId,
    purpose: Purpose,
    include: bool,
) -> Result<Document, ShowError> {
    let table = type_name.replace('-', "_");
    let class = registry().lookup(&table, purpose)?;
    let snapshot = app.store.snapshot().await?;
    let context = app.facade_context("").with_relationships(true, true);

    let (facade, _options, errors) = class.get_resource_facade(&snapshot, &context, id);
    let Some(facade) = facade else {
        return Ok(Document::errors(errors));
    };
    let mut document = Document::single(facade.resource().clone());
    if include {
        if let Some(record) = snapshot.lookup(class.table(), id) {
            document = document.with_included(included(
                &snapshot,
                record,
                &context,
                app.config.include_depth,
            ));
        }
    }
    Ok(document)
}
