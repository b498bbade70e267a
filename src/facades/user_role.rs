use super::{object, referencing};
use crate::framework::{Relationship, ResourceFacade};
use crate::model::{AttributeError, Attributes, EntityId, Record, RelatedResources, User, UserRole};
use crate::store::Snapshot;
use serde_json::{json, Map, Value};

pub struct UserRoleFacade;

const RELATIONSHIPS: &[Relationship<UserRole>] = &[Relationship {
    name: "users",
    resource_attribute: "users",
    resolve: users,
}];

fn users<'a>(snapshot: &'a Snapshot, role: &'a UserRole) -> Vec<&'a Record> {
    referencing::<User>(snapshot, |u| u.role_id == Some(role.id))
}

impl ResourceFacade for UserRoleFacade {
    type Model = UserRole;
    const NAME: &'static str = "UserRoleFacade";
    const TYPE: &'static str = "user-role";
    const TYPE_PLURAL: &'static str = "user-roles";

    fn attributes(_snapshot: &Snapshot, role: &UserRole) -> Map<String, Value> {
        object(json!({
            "label": role.label,
            "description": role.description,
        }))
    }

    fn relationships() -> &'static [Relationship<UserRole>] {
        RELATIONSHIPS
    }

    fn build_model(
        id: EntityId,
        attributes: Attributes<'_>,
        _related: &RelatedResources,
    ) -> Result<UserRole, AttributeError> {
        Ok(UserRole {
            id,
            label: attributes.string("label")?,
            description: attributes.string("description")?,
        })
    }
}
