use super::{object, referencing};
use crate::framework::{Relationship, ResourceFacade};
use crate::model::{AttributeError, Attributes, EntityId, PersonHasRole, PersonRole, Record, RelatedResources};
use crate::store::Snapshot;
use serde_json::{json, Map, Value};

pub struct PersonRoleFacade;

const RELATIONSHIPS: &[Relationship<PersonRole>] = &[Relationship {
    name: "persons-having-roles",
    resource_attribute: "persons_having_roles",
    resolve: persons_having_roles,
}];

fn persons_having_roles<'a>(snapshot: &'a Snapshot, role: &'a PersonRole) -> Vec<&'a Record> {
    referencing::<PersonHasRole>(snapshot, |phr| phr.person_role_id == Some(role.id))
}

impl ResourceFacade for PersonRoleFacade {
    type Model = PersonRole;
    const NAME: &'static str = "PersonRoleFacade";
    const TYPE: &'static str = "person-role";
    const TYPE_PLURAL: &'static str = "person-roles";

    fn attributes(_snapshot: &Snapshot, role: &PersonRole) -> Map<String, Value> {
        object(json!({
            "label": role.label,
            "description": role.description,
        }))
    }

    fn relationships() -> &'static [Relationship<PersonRole>] {
        RELATIONSHIPS
    }

    fn build_model(
        id: EntityId,
        attributes: Attributes<'_>,
        _related: &RelatedResources,
    ) -> Result<PersonRole, AttributeError> {
        Ok(PersonRole {
            id,
            label: attributes.string("label")?,
            description: attributes.string("description")?,
        })
    }
}
