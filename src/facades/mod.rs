//! # Facades of the Archive
//!
//! One [`ResourceFacade`](crate::framework::ResourceFacade) per exposed table,
//! plus the search variant of documents. [`standard_registry`] enumerates them;
//! it is what [`registry()`](crate::framework::registry) is built from.
//!
//! Whitelists are stored but never exposed, so they are not registered.

pub mod collection;
pub mod document;
pub mod image;
pub mod institution;
pub mod language;
pub mod note;
pub mod person;
pub mod person_has_role;
pub mod person_role;
pub mod user;
pub mod user_role;
pub mod witness;

pub use collection::CollectionFacade;
pub use document::{DocumentFacade, DocumentSearchFacade};
pub use image::ImageFacade;
pub use institution::InstitutionFacade;
pub use language::LanguageFacade;
pub use note::NoteFacade;
pub use person::PersonFacade;
pub use person_has_role::PersonHasRoleFacade;
pub use person_role::PersonRoleFacade;
pub use user::UserFacade;
pub use user_role::UserRoleFacade;
pub use witness::WitnessFacade;

use crate::framework::FacadeRegistry;
use crate::model::{EntityId, Model, Record};
use crate::store::Snapshot;
use serde_json::{Map, Value};

pub fn standard_registry() -> FacadeRegistry {
    FacadeRegistry::builder()
        .register::<CollectionFacade>()
        .register_with_search::<DocumentFacade, DocumentSearchFacade>()
        .register::<NoteFacade>()
        .register::<WitnessFacade>()
        .register::<InstitutionFacade>()
        .register::<ImageFacade>()
        .register::<LanguageFacade>()
        .register::<PersonFacade>()
        .register::<PersonRoleFacade>()
        .register::<PersonHasRoleFacade>()
        .register::<UserFacade>()
        .register::<UserRoleFacade>()
        .build()
}

/// Unwraps the object built by `json!({...})`.
pub(crate) fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// To-one side of a foreign key.
pub(crate) fn one<M: Model>(snapshot: &Snapshot, id: Option<EntityId>) -> Vec<&Record> {
    id.and_then(|id| snapshot.lookup(M::TAG, id))
        .into_iter()
        .collect()
}

/// Rows of `M` for a list of ids, in list order. Dangling ids are skipped.
pub(crate) fn many<'a, M: Model>(snapshot: &'a Snapshot, ids: &[EntityId]) -> Vec<&'a Record> {
    ids.iter()
        .filter_map(|id| snapshot.lookup(M::TAG, *id))
        .collect()
}

/// Reverse side of a foreign key: every row of `M` matching `points_here`.
pub(crate) fn referencing<M: Model>(
    snapshot: &Snapshot,
    points_here: impl Fn(&M) -> bool,
) -> Vec<&Record> {
    snapshot
        .scan_records(M::TAG)
        .filter(|record| M::from_record(record).is_some_and(&points_here))
        .collect()
}

#[cfg(test)]
pub(crate) mod test_data {
    //! A small archive shared by the facade tests.
    //!
    //! | table | rows |
    //! |---|---|
    //! | user_role / user | 1 admin, 1 user |
    //! | language | 1 fra, 2 lat |
    //! | collection | 1 "Correspondance" |
    //! | document | 1 (fra, lat, collection 1), 2 (fra, after 1) |
    //! | note, witness, institution, image | one each, on document 1 |
    //! | person, person_role, person_has_role | one each, on document 1 |

    use crate::model::*;
    use crate::store::Snapshot;

    pub fn archive() -> Snapshot {
        let mut snapshot = Snapshot::new();
        let mut add = |record: Record| {
            snapshot.insert(record).unwrap();
        };

        add(UserRole::new("admin", "Administrator").into_record());
        add(User {
            username: Some("admin".into()),
            password: "secret-hash".into(),
            email: Some("admin@example.org".into()),
            active: true,
            first_name: "Ada".into(),
            last_name: "Admin".into(),
            role_id: Some(1),
            ..User::default()
        }
        .into_record());
        add(Language::new("fra", "Français").into_record());
        add(Language::new("lat", "Latin").into_record());
        add(Collection::new("Correspondance").into_record());
        add(Document {
            argument: Some("Lettre au roi".into()),
            transcription: Some("Sire, ...".into()),
            is_published: Some(true),
            language_ids: vec![1, 2],
            collection_ids: vec![1],
            ..Document::new("Lettre 1", 1)
        }
        .into_record());
        add(Document {
            prev_document_id: Some(1),
            language_ids: vec![1],
            ..Document::new("Lettre 2", 1)
        }
        .into_record());
        add(Note {
            content: Some("Date incertaine".into()),
            label: Some("date".into()),
            document_id: Some(1),
            ..Note::default()
        }
        .into_record());
        add(Institution {
            name: Some("BnF".into()),
            reference: Some("https://www.bnf.fr".into()),
            ..Institution::default()
        }
        .into_record());
        add(Witness {
            document_id: Some(1),
            content: Some("Original autographe".into()),
            tradition: Some(Tradition::Original),
            status: Some(WitnessStatus::Base),
            institution_id: Some(1),
            classification_mark: Some("Fr. 3087".into()),
            ..Witness::default()
        }
        .into_record());
        add(Image {
            witness_id: Some(1),
            canvas_idx: Some(0),
            manifest_url: Some("https://example.org/iiif/manifest.json".into()),
            ..Image::default()
        }
        .into_record());
        add(Person {
            firstname: Some("Catherine".into()),
            lastname: Some("de Médicis".into()),
            key: Some("medicis-catherine".into()),
            ..Person::default()
        }
        .into_record());
        add(PersonRole {
            label: Some("expéditeur".into()),
            ..PersonRole::default()
        }
        .into_record());
        add(PersonHasRole {
            person_id: Some(1),
            document_id: Some(1),
            person_role_id: Some(1),
            ..PersonHasRole::default()
        }
        .into_record());
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::Purpose;
    use crate::model::TypeTag;

    #[test]
    fn test_every_exposed_table_is_registered_for_both_purposes() {
        let registry = standard_registry();
        for tag in TypeTag::ALL.iter().filter(|t| **t != TypeTag::Whitelist) {
            for purpose in Purpose::ALL {
                let class = registry.lookup(tag.as_str(), purpose).unwrap();
                assert_eq!(class.table(), *tag);
            }
        }
        assert!(!registry.contains("whitelist"));
    }

    #[test]
    fn test_documents_have_a_distinct_search_class() {
        let registry = standard_registry();
        let default = registry.lookup("document", Purpose::Default).unwrap();
        let search = registry.lookup("document", Purpose::Search).unwrap();
        assert_eq!(default.name(), "DocumentFacade");
        assert_eq!(search.name(), "DocumentSearchFacade");
        assert_eq!(search.index_name(), "documents");
    }

    #[test]
    fn test_reverse_lookup_helpers() {
        let snapshot = test_data::archive();
        let notes = referencing::<crate::model::Note>(&snapshot, |n| n.document_id == Some(1));
        assert_eq!(notes.len(), 1);
        assert!(one::<crate::model::User>(&snapshot, None).is_empty());
        assert_eq!(many::<crate::model::Language>(&snapshot, &[2, 9, 1]).len(), 2);
    }
}
