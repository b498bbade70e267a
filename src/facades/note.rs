use super::{object, one};
use crate::framework::{Relationship, ResourceFacade};
use crate::model::{related_id, AttributeError, Attributes, Document, EntityId, Note, Record, RelatedResources};
use crate::store::Snapshot;
use serde_json::{json, Map, Value};

pub struct NoteFacade;

const RELATIONSHIPS: &[Relationship<Note>] = &[Relationship {
    name: "document",
    resource_attribute: "document",
    resolve: document,
}];

fn document<'a>(snapshot: &'a Snapshot, note: &'a Note) -> Vec<&'a Record> {
    one::<Document>(snapshot, note.document_id)
}

impl ResourceFacade for NoteFacade {
    type Model = Note;
    const NAME: &'static str = "NoteFacade";
    const TYPE: &'static str = "note";
    const TYPE_PLURAL: &'static str = "notes";

    fn attributes(_snapshot: &Snapshot, note: &Note) -> Map<String, Value> {
        object(json!({
            "content": note.content,
            "label": note.label,
        }))
    }

    fn relationships() -> &'static [Relationship<Note>] {
        RELATIONSHIPS
    }

    fn build_model(
        id: EntityId,
        attributes: Attributes<'_>,
        related: &RelatedResources,
    ) -> Result<Note, AttributeError> {
        Ok(Note {
            id,
            content: attributes.string("content")?,
            label: attributes.string("label")?,
            document_id: related_id(related, "document", "document")?,
        })
    }

    fn propagation_targets<'a>(snapshot: &'a Snapshot, note: &'a Note) -> Vec<&'a Record> {
        document(snapshot, note)
    }
}
