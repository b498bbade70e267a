use super::{Constraints, EntityId};
use crate::store::{Snapshot, StoreError};
use serde::{Deserialize, Serialize};

/// A correspondent: author, recipient, or someone mentioned in a letter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: EntityId,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub key: Option<String>,
    #[serde(rename = "ref")]
    pub reference: Option<String>,
}

impl Constraints for Person {
    fn check_constraints(&self, _snapshot: &Snapshot) -> Result<(), StoreError> {
        Ok(())
    }
}
