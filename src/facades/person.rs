use super::{object, referencing};
use crate::framework::{Relationship, ResourceFacade};
use crate::model::{
    AttributeError, Attributes, Document, EntityId, Model, Person, PersonHasRole, Record,
    RelatedResources,
};
use crate::store::Snapshot;
use serde_json::{json, Map, Value};

pub struct PersonFacade;

const RELATIONSHIPS: &[Relationship<Person>] = &[
    Relationship {
        name: "persons-having-roles",
        resource_attribute: "persons_having_roles",
        resolve: persons_having_roles,
    },
    Relationship {
        name: "documents",
        resource_attribute: "documents",
        resolve: documents,
    },
];

fn persons_having_roles<'a>(snapshot: &'a Snapshot, person: &'a Person) -> Vec<&'a Record> {
    referencing::<PersonHasRole>(snapshot, |phr| phr.person_id == Some(person.id))
}

/// Documents the person has any role in, each listed once.
fn documents<'a>(snapshot: &'a Snapshot, person: &'a Person) -> Vec<&'a Record> {
    let mut ids: Vec<EntityId> = Vec::new();
    for phr in persons_having_roles(snapshot, person)
        .into_iter()
        .filter_map(PersonHasRole::from_record)
    {
        if let Some(id) = phr.document_id.filter(|id| !ids.contains(id)) {
            ids.push(id);
        }
    }
    super::many::<Document>(snapshot, &ids)
}

impl ResourceFacade for PersonFacade {
    type Model = Person;
    const NAME: &'static str = "PersonFacade";
    const TYPE: &'static str = "person";
    const TYPE_PLURAL: &'static str = "persons";

    fn attributes(_snapshot: &Snapshot, person: &Person) -> Map<String, Value> {
        object(json!({
            "firstname": person.firstname,
            "lastname": person.lastname,
            "key": person.key,
            "ref": person.reference,
        }))
    }

    fn relationships() -> &'static [Relationship<Person>] {
        RELATIONSHIPS
    }

    fn build_model(
        id: EntityId,
        attributes: Attributes<'_>,
        _related: &RelatedResources,
    ) -> Result<Person, AttributeError> {
        Ok(Person {
            id,
            firstname: attributes.string("firstname")?,
            lastname: attributes.string("lastname")?,
            key: attributes.string("key")?,
            reference: attributes.string("ref")?,
        })
    }

    fn propagation_targets<'a>(snapshot: &'a Snapshot, person: &'a Person) -> Vec<&'a Record> {
        documents(snapshot, person)
    }
}
