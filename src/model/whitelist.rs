use super::{distinct, max_len, references, Constraints, EntityId, TypeTag};
use crate::store::{Snapshot, StoreError};
use serde::{Deserialize, Serialize};

/// Users allowed to see an unpublished document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Whitelist {
    pub id: EntityId,
    pub label: Option<String>,
    #[serde(default)]
    pub user_ids: Vec<EntityId>,
}

impl Constraints for Whitelist {
    fn check_constraints(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        max_len(TypeTag::Whitelist, "label", &self.label, 45)?;
        distinct(TypeTag::Whitelist, "user_id", &self.user_ids)?;
        for id in &self.user_ids {
            references(snapshot, TypeTag::Whitelist, "user_id", TypeTag::User, Some(*id))?;
        }
        Ok(())
    }
}
