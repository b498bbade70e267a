use super::{object, referencing};
use crate::framework::{Relationship, ResourceFacade};
use crate::model::{AttributeError, Attributes, EntityId, Institution, Record, RelatedResources, Witness};
use crate::store::Snapshot;
use serde_json::{json, Map, Value};

pub struct InstitutionFacade;

const RELATIONSHIPS: &[Relationship<Institution>] = &[Relationship {
    name: "witnesses",
    resource_attribute: "witnesses",
    resolve: witnesses,
}];

fn witnesses<'a>(snapshot: &'a Snapshot, institution: &'a Institution) -> Vec<&'a Record> {
    referencing::<Witness>(snapshot, |w| w.institution_id == Some(institution.id))
}

impl ResourceFacade for InstitutionFacade {
    type Model = Institution;
    const NAME: &'static str = "InstitutionFacade";
    const TYPE: &'static str = "institution";
    const TYPE_PLURAL: &'static str = "institutions";

    fn attributes(_snapshot: &Snapshot, institution: &Institution) -> Map<String, Value> {
        object(json!({
            "name": institution.name,
            "ref": institution.reference,
        }))
    }

    fn relationships() -> &'static [Relationship<Institution>] {
        RELATIONSHIPS
    }

    fn build_model(
        id: EntityId,
        attributes: Attributes<'_>,
        _related: &RelatedResources,
    ) -> Result<Institution, AttributeError> {
        Ok(Institution {
            id,
            name: attributes.string("name")?,
            reference: attributes.string("ref")?,
        })
    }

    fn propagation_targets<'a>(snapshot: &'a Snapshot, institution: &'a Institution) -> Vec<&'a Record> {
        witnesses(snapshot, institution)
    }
}
