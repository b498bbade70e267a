//! Rebuilding search indexes from the store.

use crate::framework::{registry, Purpose, RegistryError};
use crate::index::{IndexError, IndexOperation};
use crate::lifecycle::AppContext;
use crate::model::TypeTag;
use crate::store::StoreError;
use thiserror::Error;
use tracing::{info, warn};

/// Index names the `db-reindex` command knows, and the table each is built from.
pub const DECLARED_INDEXES: &[(&str, TypeTag)] = &[
    ("collections", TypeTag::Collection),
    ("languages", TypeTag::Language),
    ("witnesses", TypeTag::Witness),
    ("persons", TypeTag::Person),
    ("documents", TypeTag::Document),
    ("institutions", TypeTag::Institution),
    ("users", TypeTag::User),
];

#[derive(Debug, Error)]
pub enum ReindexError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReindexReport {
    pub index: &'static str,
    pub count: usize,
}

/// Expands `"all"` or a comma separated list into index names.
pub fn requested_indexes(indexes: &str) -> Vec<&str> {
    if indexes.trim() == "all" {
        return DECLARED_INDEXES.iter().map(|(name, _)| *name).collect();
    }
    indexes
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Drops and rebuilds each requested index, one table at a time.
///
/// Every row is rendered by the search facade of its table with links
/// prefixed by `{host}{api_url_prefix}`, and inserted without propagation.
/// Undeclared names are skipped with a warning.
pub async fn reindex(
    app: &AppContext,
    indexes: &str,
    host: &str,
) -> Result<Vec<ReindexReport>, ReindexError> {
    let snapshot = app.store.snapshot().await?;
    let context = app.facade_context(host);
    let mut reports = Vec::new();

    for name in requested_indexes(indexes) {
        let Some(&(index, tag)) = DECLARED_INDEXES.iter().find(|(declared, _)| *declared == name)
        else {
            warn!(index = name, "Index does not exist or is not declared");
            continue;
        };
        let class = registry().lookup(tag.as_str(), Purpose::Search)?;

        info!(index, "Reindexing");
        app.index.delete_index(class.index_name()).await?;

        let mut count = 0;
        for record in snapshot.scan_records(tag) {
            if let Some(facade) = class.build(&snapshot, record, context.clone()) {
                facade
                    .reindex(app.index.as_ref(), IndexOperation::Insert, false)
                    .await?;
                count += 1;
            }
        }
        info!(index, count, "Reindexed");
        reports.push(ReindexReport { index, count });
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_indexes() {
        assert_eq!(requested_indexes("all").len(), DECLARED_INDEXES.len());
        assert_eq!(requested_indexes("languages, persons,"), vec!["languages", "persons"]);
    }
}
