use super::{object, one};
use crate::framework::{Relationship, ResourceFacade};
use crate::model::{related_id, AttributeError, Attributes, EntityId, Image, Record, RelatedResources, Witness};
use crate::store::Snapshot;
use serde_json::{json, Map, Value};

pub struct ImageFacade;

const RELATIONSHIPS: &[Relationship<Image>] = &[Relationship {
    name: "witness",
    resource_attribute: "witness",
    resolve: witness,
}];

fn witness<'a>(snapshot: &'a Snapshot, image: &'a Image) -> Vec<&'a Record> {
    one::<Witness>(snapshot, image.witness_id)
}

impl ResourceFacade for ImageFacade {
    type Model = Image;
    const NAME: &'static str = "ImageFacade";
    const TYPE: &'static str = "image";
    const TYPE_PLURAL: &'static str = "images";

    fn attributes(_snapshot: &Snapshot, image: &Image) -> Map<String, Value> {
        object(json!({
            "canvas-idx": image.canvas_idx,
            "manifest-url": image.manifest_url,
        }))
    }

    fn relationships() -> &'static [Relationship<Image>] {
        RELATIONSHIPS
    }

    fn build_model(
        id: EntityId,
        attributes: Attributes<'_>,
        related: &RelatedResources,
    ) -> Result<Image, AttributeError> {
        Ok(Image {
            id,
            witness_id: related_id(related, "witness", "witness")?,
            canvas_idx: attributes.integer("canvas-idx")?,
            manifest_url: attributes.string("manifest-url")?,
        })
    }
}
