use super::{object, referencing};
use crate::framework::{Relationship, ResourceFacade};
use crate::model::{AttributeError, Attributes, Collection, Document, EntityId, Record, RelatedResources};
use crate::store::Snapshot;
use serde_json::{json, Map, Value};

pub struct CollectionFacade;

const RELATIONSHIPS: &[Relationship<Collection>] = &[Relationship {
    name: "documents",
    resource_attribute: "documents",
    resolve: documents,
}];

fn documents<'a>(snapshot: &'a Snapshot, collection: &'a Collection) -> Vec<&'a Record> {
    referencing::<Document>(snapshot, |d| d.collection_ids.contains(&collection.id))
}

impl ResourceFacade for CollectionFacade {
    type Model = Collection;
    const NAME: &'static str = "CollectionFacade";
    const TYPE: &'static str = "collection";
    const TYPE_PLURAL: &'static str = "collections";

    fn attributes(_snapshot: &Snapshot, collection: &Collection) -> Map<String, Value> {
        object(json!({
            "title": collection.title,
            "description": collection.description,
        }))
    }

    fn relationships() -> &'static [Relationship<Collection>] {
        RELATIONSHIPS
    }

    fn build_model(
        id: EntityId,
        attributes: Attributes<'_>,
        _related: &RelatedResources,
    ) -> Result<Collection, AttributeError> {
        Ok(Collection {
            id,
            title: attributes.string("title")?,
            description: attributes.string("description")?,
        })
    }

    fn propagation_targets<'a>(snapshot: &'a Snapshot, collection: &'a Collection) -> Vec<&'a Record> {
        documents(snapshot, collection)
    }
}
