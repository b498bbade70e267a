use super::{object, one, referencing};
use crate::framework::{Relationship, ResourceFacade};
use crate::model::{
    related_id, AttributeError, Attributes, Document, EntityId, Image, Institution, Record,
    RelatedResources, Tradition, Witness, WitnessStatus,
};
use crate::store::Snapshot;
use serde_json::{json, Map, Value};

pub struct WitnessFacade;

const RELATIONSHIPS: &[Relationship<Witness>] = &[
    Relationship {
        name: "document",
        resource_attribute: "document",
        resolve: document,
    },
    Relationship {
        name: "institution",
        resource_attribute: "institution",
        resolve: institution,
    },
    Relationship {
        name: "images",
        resource_attribute: "images",
        resolve: images,
    },
];

fn document<'a>(snapshot: &'a Snapshot, witness: &'a Witness) -> Vec<&'a Record> {
    one::<Document>(snapshot, witness.document_id)
}

fn institution<'a>(snapshot: &'a Snapshot, witness: &'a Witness) -> Vec<&'a Record> {
    one::<Institution>(snapshot, witness.institution_id)
}

fn images<'a>(snapshot: &'a Snapshot, witness: &'a Witness) -> Vec<&'a Record> {
    referencing::<Image>(snapshot, |i| i.witness_id == Some(witness.id))
}

impl ResourceFacade for WitnessFacade {
    type Model = Witness;
    const NAME: &'static str = "WitnessFacade";
    const TYPE: &'static str = "witness";
    const TYPE_PLURAL: &'static str = "witnesses";

    fn attributes(_snapshot: &Snapshot, witness: &Witness) -> Map<String, Value> {
        object(json!({
            "content": witness.content,
            "tradition": witness.tradition.map(Tradition::as_str),
            "status": witness.status.map(WitnessStatus::as_str),
            "classification-mark": witness.classification_mark,
        }))
    }

    fn relationships() -> &'static [Relationship<Witness>] {
        RELATIONSHIPS
    }

    fn build_model(
        id: EntityId,
        attributes: Attributes<'_>,
        related: &RelatedResources,
    ) -> Result<Witness, AttributeError> {
        Ok(Witness {
            id,
            document_id: related_id(related, "document", "document")?,
            content: attributes.string("content")?,
            tradition: attributes.choice("tradition", Tradition::parse)?,
            status: attributes.choice("status", WitnessStatus::parse)?,
            institution_id: related_id(related, "institution", "institution")?,
            classification_mark: attributes.string("classification-mark")?,
        })
    }

    fn propagation_targets<'a>(snapshot: &'a Snapshot, witness: &'a Witness) -> Vec<&'a Record> {
        document(snapshot, witness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facades::test_data;
    use crate::framework::{Facade, FacadeContext};
    use crate::model::AttributeError;

    #[test]
    fn test_enum_attributes_use_archive_values() {
        let snapshot = test_data::archive();
        let witness = snapshot.get::<Witness>(1).unwrap();
        let facade = Facade::<WitnessFacade>::new(&snapshot, witness, FacadeContext::new(""));
        let attributes = &facade.resource().attributes;
        assert_eq!(attributes["tradition"], "original");
        assert_eq!(attributes["status"], "base");
        assert_eq!(attributes["classification-mark"], "Fr. 3087");
    }

    #[test]
    fn test_unknown_tradition_is_rejected() {
        let attributes = json!({"content": "copie tardive", "tradition": "photocopie"});
        let err = WitnessFacade::build_model(
            0,
            Attributes::new(attributes.as_object().unwrap()),
            &RelatedResources::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            AttributeError::InvalidValue {
                field: "tradition".into(),
                value: "photocopie".into()
            }
        );
    }

    #[test]
    fn test_images_and_institution() {
        let snapshot = test_data::archive();
        let witness = snapshot.get::<Witness>(1).unwrap();
        let facade = Facade::<WitnessFacade>::new(&snapshot, witness, FacadeContext::new(""));
        let images = facade.resources("images").unwrap();
        assert_eq!(images[0].attributes["canvas-idx"], 0);
        let institution = facade.resources("institution").unwrap();
        assert_eq!(institution[0].attributes["name"], "BnF");
    }
}
