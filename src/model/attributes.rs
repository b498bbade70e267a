//! Typed reads over the loose `attributes` / `relationships` payloads of a
//! create request.
//!
//! Missing keys and JSON `null` both read as `None`; only a value of the wrong
//! JSON type is an error at this stage. Whether a column may stay empty is the
//! store's business, checked at commit time.

use crate::framework::ResourceIdentifier;
use crate::model::EntityId;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// Relationship name → identifiers supplied with a create request.
pub type RelatedResources = BTreeMap<String, Vec<ResourceIdentifier>>;

/// A create payload that can't be turned into an entity.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AttributeError {
    #[error("attribute '{field}' must be {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("attribute '{field}' has unsupported value '{value}'")]
    InvalidValue { field: String, value: String },

    #[error("relationship '{relationship}' expects '{expected}' identifiers, got '{found}'")]
    WrongRelationshipType {
        relationship: String,
        expected: &'static str,
        found: String,
    },

    #[error("relationship '{relationship}' accepts a single identifier, got {count}")]
    TooManyIdentifiers { relationship: String, count: usize },
}

/// Read-only view over the `attributes` object of a create request.
#[derive(Debug, Clone, Copy)]
pub struct Attributes<'a>(&'a Map<String, Value>);

impl<'a> Attributes<'a> {
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self(map)
    }

    fn present(&self, field: &str) -> Option<&'a Value> {
        self.0.get(field).filter(|v| !v.is_null())
    }

    pub fn string(&self, field: &str) -> Result<Option<String>, AttributeError> {
        match self.present(field) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(AttributeError::WrongType {
                field: field.to_string(),
                expected: "a string",
            }),
        }
    }

    pub fn boolean(&self, field: &str) -> Result<Option<bool>, AttributeError> {
        match self.present(field) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(AttributeError::WrongType {
                field: field.to_string(),
                expected: "a boolean",
            }),
        }
    }

    pub fn integer(&self, field: &str) -> Result<Option<i64>, AttributeError> {
        match self.present(field) {
            None => Ok(None),
            Some(v) => v.as_i64().map(Some).ok_or_else(|| AttributeError::WrongType {
                field: field.to_string(),
                expected: "an integer",
            }),
        }
    }

    /// Reads a string restricted to a closed set of values.
    pub fn choice<T>(
        &self,
        field: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>, AttributeError> {
        match self.string(field)? {
            None => Ok(None),
            Some(raw) => parse(&raw).map(Some).ok_or(AttributeError::InvalidValue {
                field: field.to_string(),
                value: raw,
            }),
        }
    }
}

/// Ids of the identifiers supplied for `relationship`, checked against the
/// expected resource type.
pub fn related_ids(
    related: &RelatedResources,
    relationship: &str,
    expected: &'static str,
) -> Result<Vec<EntityId>, AttributeError> {
    let Some(identifiers) = related.get(relationship) else {
        return Ok(Vec::new());
    };
    identifiers
        .iter()
        .map(|ri| {
            if ri.type_ == expected {
                Ok(ri.id)
            } else {
                Err(AttributeError::WrongRelationshipType {
                    relationship: relationship.to_string(),
                    expected,
                    found: ri.type_.clone(),
                })
            }
        })
        .collect()
}

/// Like [`related_ids`] for a to-one relationship.
pub fn related_id(
    related: &RelatedResources,
    relationship: &str,
    expected: &'static str,
) -> Result<Option<EntityId>, AttributeError> {
    let ids = related_ids(related, relationship, expected)?;
    match ids.as_slice() {
        [] => Ok(None),
        [id] => Ok(Some(*id)),
        _ => Err(AttributeError::TooManyIdentifiers {
            relationship: relationship.to_string(),
            count: ids.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_and_null_read_as_none() {
        let map = json!({ "label": null }).as_object().cloned().unwrap();
        let attrs = Attributes::new(&map);
        assert_eq!(attrs.string("label").unwrap(), None);
        assert_eq!(attrs.string("code").unwrap(), None);
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let map = json!({ "code": 12 }).as_object().cloned().unwrap();
        let err = Attributes::new(&map).string("code").unwrap_err();
        assert!(matches!(err, AttributeError::WrongType { ref field, .. } if field == "code"));
    }

    #[test]
    fn test_related_ids_checks_type() {
        let mut related = RelatedResources::new();
        related.insert(
            "languages".into(),
            vec![ResourceIdentifier::new(3, "collection")],
        );
        let err = related_ids(&related, "languages", "language").unwrap_err();
        assert!(matches!(err, AttributeError::WrongRelationshipType { .. }));
    }

    #[test]
    fn test_related_id_rejects_many() {
        let mut related = RelatedResources::new();
        related.insert(
            "owner".into(),
            vec![
                ResourceIdentifier::new(1, "user"),
                ResourceIdentifier::new(2, "user"),
            ],
        );
        assert!(related_id(&related, "owner", "user").is_err());
        assert_eq!(related_id(&related, "missing", "user").unwrap(), None);
    }
}
