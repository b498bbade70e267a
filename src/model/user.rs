use super::{not_null, references, unique, Constraints, EntityId, TypeTag};
use crate::store::{Snapshot, StoreError};
use serde::{Deserialize, Serialize};

/// An account of the editing interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub username: Option<String>,
    /// Password hash. Stored, never exposed through a facade.
    pub password: String,
    pub email: Option<String>,
    pub active: bool,
    pub first_name: String,
    pub last_name: String,
    pub role_id: Option<EntityId>,
}

impl Constraints for User {
    fn check_constraints(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        not_null(TypeTag::User, "username", &self.username)?;
        not_null(TypeTag::User, "email", &self.email)?;
        not_null(TypeTag::User, "role_id", &self.role_id)?;
        references(snapshot, TypeTag::User, "role_id", TypeTag::UserRole, self.role_id)?;
        unique(snapshot, self, "username", |u| u.username.as_deref())?;
        unique(snapshot, self, "email", |u| u.email.as_deref())
    }
}
