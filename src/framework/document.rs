//! # JSON:API Wire Types
//!
//! The subset of JSON:API the facades produce: resource objects, resource
//! identifiers, relationship objects, error objects, and the top-level
//! document wrapping them.

use crate::model::EntityId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// Minimal `{id, type}` reference to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub type_: String,
}

impl ResourceIdentifier {
    pub fn new(id: EntityId, type_: impl Into<String>) -> Self {
        Self {
            id,
            type_: type_.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLinks {
    #[serde(rename = "self")]
    pub self_: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipLinks {
    #[serde(rename = "self")]
    pub self_: String,
    pub related: String,
}

/// One entry of a resource's `relationships` member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipObject {
    pub links: RelationshipLinks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<ResourceIdentifier>>,
}

/// Full representation of one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub type_: String,
    pub attributes: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<BTreeMap<String, RelationshipObject>>,
    #[serde(default)]
    pub meta: Map<String, Value>,
    pub links: ResourceLinks,
}

impl ResourceObject {
    pub fn identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier::new(self.id, self.type_.clone())
    }
}

/// JSON:API error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{title} ({status})")]
pub struct ApiError {
    pub status: u16,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ApiError {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            status,
            title: title.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Response options returned next to a facade by the read accessor. Empty
/// when the lookup succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseOptions {
    pub status: Option<u16>,
}

impl ResponseOptions {
    pub fn status(status: u16) -> Self {
        Self {
            status: Some(status),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonApiVersion {
    pub version: String,
}

/// Top-level JSON:API document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ResourceObject>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<ResourceObject>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ApiError>,
    pub jsonapi: JsonApiVersion,
}

impl Document {
    fn empty() -> Self {
        Self {
            data: None,
            included: Vec::new(),
            errors: Vec::new(),
            jsonapi: JsonApiVersion {
                version: "1.0".to_string(),
            },
        }
    }

    pub fn single(resource: ResourceObject) -> Self {
        Self {
            data: Some(resource),
            ..Self::empty()
        }
    }

    pub fn with_included(mut self, included: Vec<ResourceObject>) -> Self {
        self.included = included;
        self
    }

    pub fn errors(errors: Vec<ApiError>) -> Self {
        Self {
            errors,
            ..Self::empty()
        }
    }
}
