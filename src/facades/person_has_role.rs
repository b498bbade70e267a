//! Association rows between a person, a document and the role the person
//! plays in it. No attributes of their own.

use super::one;
use crate::framework::{Relationship, ResourceFacade};
use crate::model::{
    related_id, AttributeError, Attributes, Document, EntityId, Person, PersonHasRole, PersonRole,
    Record, RelatedResources,
};
use crate::store::Snapshot;
use serde_json::{Map, Value};

pub struct PersonHasRoleFacade;

const RELATIONSHIPS: &[Relationship<PersonHasRole>] = &[
    Relationship {
        name: "person",
        resource_attribute: "person",
        resolve: person,
    },
    Relationship {
        name: "document",
        resource_attribute: "document",
        resolve: document,
    },
    Relationship {
        name: "person-role",
        resource_attribute: "person_role",
        resolve: person_role,
    },
];

fn person<'a>(snapshot: &'a Snapshot, phr: &'a PersonHasRole) -> Vec<&'a Record> {
    one::<Person>(snapshot, phr.person_id)
}

fn document<'a>(snapshot: &'a Snapshot, phr: &'a PersonHasRole) -> Vec<&'a Record> {
    one::<Document>(snapshot, phr.document_id)
}

fn person_role<'a>(snapshot: &'a Snapshot, phr: &'a PersonHasRole) -> Vec<&'a Record> {
    one::<PersonRole>(snapshot, phr.person_role_id)
}

impl ResourceFacade for PersonHasRoleFacade {
    type Model = PersonHasRole;
    const NAME: &'static str = "PersonHasRoleFacade";
    const TYPE: &'static str = "person-has-role";
    const TYPE_PLURAL: &'static str = "persons-having-roles";

    fn attributes(_snapshot: &Snapshot, _phr: &PersonHasRole) -> Map<String, Value> {
        Map::new()
    }

    fn relationships() -> &'static [Relationship<PersonHasRole>] {
        RELATIONSHIPS
    }

    fn build_model(
        id: EntityId,
        _attributes: Attributes<'_>,
        related: &RelatedResources,
    ) -> Result<PersonHasRole, AttributeError> {
        Ok(PersonHasRole {
            id,
            person_id: related_id(related, "person", "person")?,
            document_id: related_id(related, "document", "document")?,
            person_role_id: related_id(related, "person-role", "person-role")?,
        })
    }
}
