use super::{max_len, not_null, references, Constraints, EntityId, TypeTag};
use crate::store::{Snapshot, StoreError};
use serde::{Deserialize, Serialize};

/// An editorial note attached to a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: EntityId,
    pub content: Option<String>,
    pub label: Option<String>,
    pub document_id: Option<EntityId>,
}

impl Constraints for Note {
    fn check_constraints(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        not_null(TypeTag::Note, "content", &self.content)?;
        max_len(TypeTag::Note, "label", &self.label, 45)?;
        not_null(TypeTag::Note, "document_id", &self.document_id)?;
        references(snapshot, TypeTag::Note, "document_id", TypeTag::Document, self.document_id)
    }
}
