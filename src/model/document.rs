use super::{distinct, max_len, not_null, references, Constraints, EntityId, TypeTag};
use crate::store::{Snapshot, StoreError};
use serde::{Deserialize, Serialize};

/// A transcribed document, here a letter.
///
/// `language_ids` and `collection_ids` are the many-to-many association rows,
/// kept in insertion order. `prev_document_id` chains letters of a series;
/// the next document is found by scanning for the row pointing back here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: EntityId,
    pub title: Option<String>,
    pub argument: Option<String>,
    pub creation: Option<String>,
    pub creation_label: Option<String>,
    pub location_date_label: Option<String>,
    pub location_date_ref: Option<String>,
    pub transcription: Option<String>,
    pub date_insert: Option<String>,
    pub date_update: Option<String>,
    pub is_published: Option<bool>,
    pub owner_id: Option<EntityId>,
    pub whitelist_id: Option<EntityId>,
    pub prev_document_id: Option<EntityId>,
    #[serde(default)]
    pub language_ids: Vec<EntityId>,
    #[serde(default)]
    pub collection_ids: Vec<EntityId>,
}

impl Document {
    pub fn new(title: impl Into<String>, owner_id: EntityId) -> Self {
        Self {
            title: Some(title.into()),
            owner_id: Some(owner_id),
            ..Self::default()
        }
    }
}

impl Constraints for Document {
    fn check_constraints(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let table = TypeTag::Document;
        not_null(table, "title", &self.title)?;
        max_len(table, "title", &self.title, 200)?;
        not_null(table, "owner_id", &self.owner_id)?;
        references(snapshot, table, "owner_id", TypeTag::User, self.owner_id)?;
        references(snapshot, table, "whitelist_id", TypeTag::Whitelist, self.whitelist_id)?;
        references(snapshot, table, "prev_document_id", TypeTag::Document, self.prev_document_id)?;
        distinct(table, "language_id", &self.language_ids)?;
        distinct(table, "collection_id", &self.collection_ids)?;
        for id in &self.language_ids {
            references(snapshot, table, "language_id", TypeTag::Language, Some(*id))?;
        }
        for id in &self.collection_ids {
            references(snapshot, table, "collection_id", TypeTag::Collection, Some(*id))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Language, Model, User, UserRole};

    fn archive() -> Snapshot {
        let mut snapshot = Snapshot::new();
        snapshot
            .insert(UserRole::new("admin", "Administrator").into_record())
            .unwrap();
        snapshot
            .insert(
                User {
                    username: Some("admin".into()),
                    email: Some("admin@example.com".into()),
                    role_id: Some(1),
                    ..User::default()
                }
                .into_record(),
            )
            .unwrap();
        snapshot
            .insert(Language::new("fra", "Français").into_record())
            .unwrap();
        snapshot
    }

    #[test]
    fn test_repeated_language_is_rejected() {
        let snapshot = archive();
        let mut document = Document::new("Lettre", 1);
        document.language_ids = vec![1, 1];
        let err = document.check_constraints(&snapshot).unwrap_err();
        assert_eq!(
            err,
            StoreError::Unique {
                table: "document",
                column: "language_id",
                value: "1".to_string(),
            }
        );

        document.language_ids = vec![1];
        assert!(document.check_constraints(&snapshot).is_ok());
    }
}
