use super::{max_len, not_null, references, Constraints, EntityId, TypeTag};
use crate::store::{Snapshot, StoreError};
use serde::{Deserialize, Serialize};

/// One IIIF canvas of a witness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: EntityId,
    pub witness_id: Option<EntityId>,
    pub canvas_idx: Option<i64>,
    pub manifest_url: Option<String>,
}

impl Constraints for Image {
    fn check_constraints(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        not_null(TypeTag::Image, "canvas_idx", &self.canvas_idx)?;
        max_len(TypeTag::Image, "manifest_url", &self.manifest_url, 200)?;
        references(snapshot, TypeTag::Image, "witness_id", TypeTag::Witness, self.witness_id)
    }
}
