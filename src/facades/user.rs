use super::{object, one, referencing};
use crate::framework::{Relationship, ResourceFacade};
use crate::model::{
    related_id, AttributeError, Attributes, Document, EntityId, Record, RelatedResources, User,
    UserRole,
};
use crate::store::Snapshot;
use serde_json::{json, Map, Value};

pub struct UserFacade;

const RELATIONSHIPS: &[Relationship<User>] = &[
    Relationship {
        name: "role",
        resource_attribute: "role",
        resolve: role,
    },
    Relationship {
        name: "documents",
        resource_attribute: "documents",
        resolve: documents,
    },
];

fn role<'a>(snapshot: &'a Snapshot, user: &'a User) -> Vec<&'a Record> {
    one::<UserRole>(snapshot, user.role_id)
}

fn documents<'a>(snapshot: &'a Snapshot, user: &'a User) -> Vec<&'a Record> {
    referencing::<Document>(snapshot, |d| d.owner_id == Some(user.id))
}

impl ResourceFacade for UserFacade {
    type Model = User;
    const NAME: &'static str = "UserFacade";
    const TYPE: &'static str = "user";
    const TYPE_PLURAL: &'static str = "users";

    // The password hash stays out of the resource.
    fn attributes(_snapshot: &Snapshot, user: &User) -> Map<String, Value> {
        object(json!({
            "username": user.username,
            "email": user.email,
            "active": user.active,
            "first-name": user.first_name,
            "last-name": user.last_name,
        }))
    }

    fn relationships() -> &'static [Relationship<User>] {
        RELATIONSHIPS
    }

    fn build_model(
        id: EntityId,
        attributes: Attributes<'_>,
        related: &RelatedResources,
    ) -> Result<User, AttributeError> {
        Ok(User {
            id,
            username: attributes.string("username")?,
            password: attributes.string("password")?.unwrap_or_default(),
            email: attributes.string("email")?,
            active: attributes.boolean("active")?.unwrap_or(true),
            first_name: attributes.string("first-name")?.unwrap_or_default(),
            last_name: attributes.string("last-name")?.unwrap_or_default(),
            role_id: related_id(related, "role", "user-role")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facades::test_data;
    use crate::framework::{Facade, FacadeContext};

    #[test]
    fn test_password_is_never_exposed() {
        let snapshot = test_data::archive();
        let user = snapshot.get::<User>(1).unwrap();
        let facade = Facade::<UserFacade>::new(&snapshot, user, FacadeContext::new(""));
        let json = serde_json::to_string(facade.resource()).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(facade.resource().attributes.get("password").is_none());
        assert_eq!(facade.resource().attributes["first-name"], "Ada");
        assert_eq!(facade.resource_identifiers("documents").unwrap().len(), 2);
    }
}
