//! Documents are the center of the archive: almost every other table points
//! at them. They are the only type with a dedicated search facade.

use super::{many, object, one, referencing};
use crate::framework::{Relationship, ResourceFacade};
use crate::model::{
    related_id, related_ids, AttributeError, Attributes, Collection, Document, EntityId, Language,
    Model, Note, PersonHasRole, Record, RelatedResources, User, Witness,
};
use crate::store::Snapshot;
use serde_json::{json, Map, Value};

pub struct DocumentFacade;

/// Index flavour of [`DocumentFacade`]: drops the long text fields and inlines
/// the labels of languages and collections so they can be searched.
pub struct DocumentSearchFacade;

const RELATIONSHIPS: &[Relationship<Document>] = &[
    Relationship {
        name: "languages",
        resource_attribute: "languages",
        resolve: languages,
    },
    Relationship {
        name: "collections",
        resource_attribute: "collections",
        resolve: collections,
    },
    Relationship {
        name: "notes",
        resource_attribute: "notes",
        resolve: notes,
    },
    Relationship {
        name: "witnesses",
        resource_attribute: "witnesses",
        resolve: witnesses,
    },
    Relationship {
        name: "owner",
        resource_attribute: "owner",
        resolve: owner,
    },
    Relationship {
        name: "prev-document",
        resource_attribute: "prev_document",
        resolve: prev_document,
    },
    Relationship {
        name: "next-document",
        resource_attribute: "next_document",
        resolve: next_document,
    },
    Relationship {
        name: "persons-having-roles",
        resource_attribute: "persons_having_roles",
        resolve: persons_having_roles,
    },
];

fn languages<'a>(snapshot: &'a Snapshot, document: &'a Document) -> Vec<&'a Record> {
    many::<Language>(snapshot, &document.language_ids)
}

fn collections<'a>(snapshot: &'a Snapshot, document: &'a Document) -> Vec<&'a Record> {
    many::<Collection>(snapshot, &document.collection_ids)
}

fn notes<'a>(snapshot: &'a Snapshot, document: &'a Document) -> Vec<&'a Record> {
    referencing::<Note>(snapshot, |n| n.document_id == Some(document.id))
}

fn witnesses<'a>(snapshot: &'a Snapshot, document: &'a Document) -> Vec<&'a Record> {
    referencing::<Witness>(snapshot, |w| w.document_id == Some(document.id))
}

fn owner<'a>(snapshot: &'a Snapshot, document: &'a Document) -> Vec<&'a Record> {
    one::<User>(snapshot, document.owner_id)
}

fn prev_document<'a>(snapshot: &'a Snapshot, document: &'a Document) -> Vec<&'a Record> {
    one::<Document>(snapshot, document.prev_document_id)
}

fn next_document<'a>(snapshot: &'a Snapshot, document: &'a Document) -> Vec<&'a Record> {
    referencing::<Document>(snapshot, |d| d.prev_document_id == Some(document.id))
}

fn persons_having_roles<'a>(snapshot: &'a Snapshot, document: &'a Document) -> Vec<&'a Record> {
    referencing::<PersonHasRole>(snapshot, |phr| phr.document_id == Some(document.id))
}

impl ResourceFacade for DocumentFacade {
    type Model = Document;
    const NAME: &'static str = "DocumentFacade";
    const TYPE: &'static str = "document";
    const TYPE_PLURAL: &'static str = "documents";

    fn attributes(_snapshot: &Snapshot, document: &Document) -> Map<String, Value> {
        object(json!({
            "title": document.title,
            "argument": document.argument,
            "creation": document.creation,
            "creation-label": document.creation_label,
            "location-date-label": document.location_date_label,
            "location-date-ref": document.location_date_ref,
            "transcription": document.transcription,
            "date-insert": document.date_insert,
            "date-update": document.date_update,
            "is-published": document.is_published,
        }))
    }

    fn relationships() -> &'static [Relationship<Document>] {
        RELATIONSHIPS
    }

    fn build_model(
        id: EntityId,
        attributes: Attributes<'_>,
        related: &RelatedResources,
    ) -> Result<Document, AttributeError> {
        Ok(Document {
            id,
            title: attributes.string("title")?,
            argument: attributes.string("argument")?,
            creation: attributes.string("creation")?,
            creation_label: attributes.string("creation-label")?,
            location_date_label: attributes.string("location-date-label")?,
            location_date_ref: attributes.string("location-date-ref")?,
            transcription: attributes.string("transcription")?,
            date_insert: attributes.string("date-insert")?,
            date_update: attributes.string("date-update")?,
            is_published: attributes.boolean("is-published")?,
            owner_id: related_id(related, "owner", "user")?,
            whitelist_id: None,
            prev_document_id: related_id(related, "prev-document", "document")?,
            language_ids: related_ids(related, "languages", "language")?,
            collection_ids: related_ids(related, "collections", "collection")?,
        })
    }
}

impl ResourceFacade for DocumentSearchFacade {
    type Model = Document;
    const NAME: &'static str = "DocumentSearchFacade";
    const TYPE: &'static str = "document";
    const TYPE_PLURAL: &'static str = "documents";

    fn attributes(snapshot: &Snapshot, document: &Document) -> Map<String, Value> {
        let mut attributes = DocumentFacade::attributes(snapshot, document);
        attributes.remove("argument");
        attributes.remove("transcription");
        let language_labels: Vec<&str> = languages(snapshot, document)
            .into_iter()
            .filter_map(Language::from_record)
            .filter_map(|language| language.label.as_deref())
            .collect();
        let collection_titles: Vec<&str> = collections(snapshot, document)
            .into_iter()
            .filter_map(Collection::from_record)
            .filter_map(|collection| collection.title.as_deref())
            .collect();
        attributes.insert("languages".into(), json!(language_labels));
        attributes.insert("collections".into(), json!(collection_titles));
        attributes
    }

    fn relationships() -> &'static [Relationship<Document>] {
        RELATIONSHIPS
    }

    fn build_model(
        id: EntityId,
        attributes: Attributes<'_>,
        related: &RelatedResources,
    ) -> Result<Document, AttributeError> {
        DocumentFacade::build_model(id, attributes, related)
    }
}
