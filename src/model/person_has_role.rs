use super::{not_null, references, Constraints, EntityId, TypeTag};
use crate::store::{Snapshot, StoreError};
use serde::{Deserialize, Serialize};

/// Association row: `person` plays `person_role` in `document`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonHasRole {
    pub id: EntityId,
    pub person_id: Option<EntityId>,
    pub document_id: Option<EntityId>,
    pub person_role_id: Option<EntityId>,
}

impl Constraints for PersonHasRole {
    fn check_constraints(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let table = TypeTag::PersonHasRole;
        not_null(table, "person_id", &self.person_id)?;
        not_null(table, "document_id", &self.document_id)?;
        not_null(table, "person_role_id", &self.person_role_id)?;
        references(snapshot, table, "person_id", TypeTag::Person, self.person_id)?;
        references(snapshot, table, "document_id", TypeTag::Document, self.document_id)?;
        references(snapshot, table, "person_role_id", TypeTag::PersonRole, self.person_role_id)
    }
}
