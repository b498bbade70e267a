use super::{max_len, not_null, Constraints, EntityId, TypeTag};
use crate::store::{Snapshot, StoreError};
use serde::{Deserialize, Serialize};

/// The part a person plays in a document (sender, recipient, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonRole {
    pub id: EntityId,
    pub label: Option<String>,
    pub description: Option<String>,
}

impl Constraints for PersonRole {
    fn check_constraints(&self, _snapshot: &Snapshot) -> Result<(), StoreError> {
        not_null(TypeTag::PersonRole, "label", &self.label)?;
        max_len(TypeTag::PersonRole, "label", &self.label, 50)?;
        max_len(TypeTag::PersonRole, "description", &self.description, 100)
    }
}
