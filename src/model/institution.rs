use super::{max_len, Constraints, EntityId, TypeTag};
use crate::store::{Snapshot, StoreError};
use serde::{Deserialize, Serialize};

/// A library or archive holding witnesses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    pub id: EntityId,
    pub name: Option<String>,
    #[serde(rename = "ref")]
    pub reference: Option<String>,
}

impl Constraints for Institution {
    fn check_constraints(&self, _snapshot: &Snapshot) -> Result<(), StoreError> {
        max_len(TypeTag::Institution, "name", &self.name, 45)?;
        max_len(TypeTag::Institution, "ref", &self.reference, 200)
    }
}
