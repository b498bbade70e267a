use super::{max_len, not_null, Constraints, EntityId, TypeTag};
use crate::store::{Snapshot, StoreError};
use serde::{Deserialize, Serialize};

/// Access level of a user account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRole {
    pub id: EntityId,
    pub label: Option<String>,
    pub description: Option<String>,
}

impl UserRole {
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: 0,
            label: Some(label.into()),
            description: Some(description.into()),
        }
    }
}

impl Constraints for UserRole {
    fn check_constraints(&self, _snapshot: &Snapshot) -> Result<(), StoreError> {
        not_null(TypeTag::UserRole, "label", &self.label)?;
        max_len(TypeTag::UserRole, "label", &self.label, 45)?;
        max_len(TypeTag::UserRole, "description", &self.description, 200)
    }
}
