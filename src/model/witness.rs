use super::{max_len, not_null, references, Constraints, EntityId, TypeTag};
use crate::store::{Snapshot, StoreError};
use serde::{Deserialize, Serialize};

/// How a witness was transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tradition {
    #[serde(rename = "original")]
    Original,
    #[serde(rename = "copie")]
    Copy,
    #[serde(rename = "édition")]
    Edition,
}

impl Tradition {
    pub fn as_str(self) -> &'static str {
        match self {
            Tradition::Original => "original",
            Tradition::Copy => "copie",
            Tradition::Edition => "édition",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "original" => Some(Tradition::Original),
            "copie" => Some(Tradition::Copy),
            "édition" => Some(Tradition::Edition),
            _ => None,
        }
    }
}

/// Whether the witness is the base text of the edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WitnessStatus {
    #[serde(rename = "base")]
    Base,
    #[serde(rename = "autre")]
    Other,
}

impl WitnessStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            WitnessStatus::Base => "base",
            WitnessStatus::Other => "autre",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "base" => Some(WitnessStatus::Base),
            "autre" => Some(WitnessStatus::Other),
            _ => None,
        }
    }
}

/// A physical or printed copy through which a letter is known.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Witness {
    pub id: EntityId,
    pub document_id: Option<EntityId>,
    pub content: Option<String>,
    pub tradition: Option<Tradition>,
    pub status: Option<WitnessStatus>,
    pub institution_id: Option<EntityId>,
    pub classification_mark: Option<String>,
}

impl Constraints for Witness {
    fn check_constraints(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let table = TypeTag::Witness;
        not_null(table, "document_id", &self.document_id)?;
        not_null(table, "content", &self.content)?;
        max_len(table, "classification_mark", &self.classification_mark, 100)?;
        references(snapshot, table, "document_id", TypeTag::Document, self.document_id)?;
        references(snapshot, table, "institution_id", TypeTag::Institution, self.institution_id)
    }
}
