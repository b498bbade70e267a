use super::{max_len, not_null, unique, Constraints, EntityId, TypeTag};
use crate::store::{Snapshot, StoreError};
use serde::{Deserialize, Serialize};

/// A grouping of letters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: EntityId,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Collection {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: Some(title.into()),
            description: None,
        }
    }
}

impl Constraints for Collection {
    fn check_constraints(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        not_null(TypeTag::Collection, "title", &self.title)?;
        max_len(TypeTag::Collection, "title", &self.title, 200)?;
        max_len(TypeTag::Collection, "description", &self.description, 400)?;
        unique(snapshot, self, "title", |c| c.title.as_deref())
    }
}
