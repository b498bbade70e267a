use super::{max_len, not_null, Constraints, EntityId, TypeTag};
use crate::store::{Snapshot, StoreError};
use serde::{Deserialize, Serialize};

/// A language a document is written in (`fra`, `lat`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub id: EntityId,
    /// Three-letter code, required.
    pub code: Option<String>,
    pub label: Option<String>,
}

impl Language {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: 0,
            code: Some(code.into()),
            label: Some(label.into()),
        }
    }
}

impl Constraints for Language {
    fn check_constraints(&self, _snapshot: &Snapshot) -> Result<(), StoreError> {
        not_null(TypeTag::Language, "code", &self.code)?;
        max_len(TypeTag::Language, "code", &self.code, 3)?;
        max_len(TypeTag::Language, "label", &self.label, 45)
    }
}
