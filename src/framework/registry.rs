//! # Facade Registry
//!
//! Maps `(table name, purpose)` to the facade class that renders rows of that
//! table. The registry is built once, then only read.
//!
//! A missing entry is not fatal: [`FacadeRegistry::get_facade_class`] logs a
//! warning and returns `None`, and every caller treats that as "skip". Use
//! [`FacadeRegistry::lookup`] where an unknown name is a caller error.

use crate::framework::{
    AnyFacade, ApiError, Facade, FacadeContext, ResourceFacade, ResourceIdentifier,
    ResourceObject, ResponseOptions,
};
use crate::model::{EntityId, Model, Record, TypeTag};
use crate::store::Snapshot;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("No facade registered for type '{type_name}' and purpose '{purpose}'")]
    UnknownFacade { type_name: String, purpose: Purpose },

    #[error("Unknown facade purpose '{0}'")]
    UnknownPurpose(String),
}

/// What a facade is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Purpose {
    /// API responses.
    Default,
    /// Search index documents.
    Search,
}

impl Purpose {
    pub const ALL: [Purpose; 2] = [Purpose::Default, Purpose::Search];

    pub fn as_str(self) -> &'static str {
        match self {
            Purpose::Default => "default",
            Purpose::Search => "search",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Purpose {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Purpose::Default),
            "search" => Ok(Purpose::Search),
            other => Err(RegistryError::UnknownPurpose(other.to_string())),
        }
    }
}

type Constructor =
    for<'a> fn(&'a Snapshot, &'a Record, FacadeContext) -> Option<Box<dyn AnyFacade + 'a>>;

type Getter = for<'a, 'b> fn(
    &'a Snapshot,
    &'b FacadeContext,
    EntityId,
) -> (Option<Box<dyn AnyFacade + 'a>>, ResponseOptions, Vec<ApiError>);

type RelatedResolver = for<'a, 'b> fn(&'a Snapshot, &'a Record, &'b str) -> Option<Vec<&'a Record>>;

fn construct<'a, F: ResourceFacade>(
    snapshot: &'a Snapshot,
    record: &'a Record,
    context: FacadeContext,
) -> Option<Box<dyn AnyFacade + 'a>> {
    let model = F::Model::from_record(record)?;
    Some(Box::new(Facade::<F>::new(snapshot, model, context)))
}

fn get_boxed<'a, 'b, F: ResourceFacade>(
    snapshot: &'a Snapshot,
    context: &'b FacadeContext,
    id: EntityId,
) -> (Option<Box<dyn AnyFacade + 'a>>, ResponseOptions, Vec<ApiError>) {
    let (facade, options, errors) = F::get_resource_facade(snapshot, context, id);
    let facade = facade.map(|f| Box::new(f) as Box<dyn AnyFacade + 'a>);
    (facade, options, errors)
}

fn resolve_related<'a, 'b, F: ResourceFacade>(
    snapshot: &'a Snapshot,
    record: &'a Record,
    relationship: &'b str,
) -> Option<Vec<&'a Record>> {
    let model = F::Model::from_record(record)?;
    let rel = F::relationships().iter().find(|rel| rel.name == relationship)?;
    Some((rel.resolve)(snapshot, model))
}

fn relationship_names<F: ResourceFacade>() -> Vec<&'static str> {
    F::relationships().iter().map(|rel| rel.name).collect()
}

/// Type-erased handle on one [`ResourceFacade`] implementation.
#[derive(Clone, Copy)]
pub struct FacadeClass {
    name: &'static str,
    table: TypeTag,
    type_name: &'static str,
    type_plural: &'static str,
    index_name: &'static str,
    identifier: fn(EntityId) -> ResourceIdentifier,
    construct: Constructor,
    get: Getter,
    related: RelatedResolver,
    relationship_names: fn() -> Vec<&'static str>,
}

impl fmt::Debug for FacadeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FacadeClass")
            .field("name", &self.name)
            .field("table", &self.table)
            .field("type_name", &self.type_name)
            .finish()
    }
}

impl FacadeClass {
    pub fn of<F: ResourceFacade>() -> Self {
        Self {
            name: F::NAME,
            table: F::Model::TAG,
            type_name: F::TYPE,
            type_plural: F::TYPE_PLURAL,
            index_name: F::index_name(),
            identifier: F::make_resource_identifier,
            construct: construct::<F>,
            get: get_boxed::<F>,
            related: resolve_related::<F>,
            relationship_names: relationship_names::<F>,
        }
    }

    /// Short name of the facade struct, e.g. `DocumentSearchFacade`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn table(&self) -> TypeTag {
        self.table
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn type_plural(&self) -> &'static str {
        self.type_plural
    }

    pub fn index_name(&self) -> &'static str {
        self.index_name
    }

    pub fn make_resource_identifier(&self, id: EntityId) -> ResourceIdentifier {
        (self.identifier)(id)
    }

    /// Wraps `record` in a facade of this class. `None` when the record
    /// belongs to another table.
    pub fn build<'a>(
        &self,
        snapshot: &'a Snapshot,
        record: &'a Record,
        context: FacadeContext,
    ) -> Option<Box<dyn AnyFacade + 'a>> {
        (self.construct)(snapshot, record, context)
    }

    /// Type-erased [`ResourceFacade::get_resource_facade`].
    pub fn get_resource_facade<'a>(
        &self,
        snapshot: &'a Snapshot,
        context: &FacadeContext,
        id: EntityId,
    ) -> (Option<Box<dyn AnyFacade + 'a>>, ResponseOptions, Vec<ApiError>) {
        (self.get)(snapshot, context, id)
    }

    pub fn resource(
        &self,
        snapshot: &Snapshot,
        record: &Record,
        context: &FacadeContext,
    ) -> Option<ResourceObject> {
        self.build(snapshot, record, context.clone())
            .map(|facade| facade.resource().clone())
    }

    pub fn relationship_names(&self) -> Vec<&'static str> {
        (self.relationship_names)()
    }

    pub fn related_records<'a>(
        &self,
        snapshot: &'a Snapshot,
        record: &'a Record,
        relationship: &str,
    ) -> Option<Vec<&'a Record>> {
        (self.related)(snapshot, record, relationship)
    }
}

#[derive(Debug, Default)]
pub struct FacadeRegistry {
    classes: HashMap<&'static str, HashMap<Purpose, FacadeClass>>,
}

/// Collects facade classes before the registry is frozen.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    classes: HashMap<&'static str, HashMap<Purpose, FacadeClass>>,
}

impl RegistryBuilder {
    /// Registers `F` for both purposes.
    pub fn register<F: ResourceFacade>(self) -> Self {
        self.register_with_search::<F, F>()
    }

    /// Registers `D` for API responses and `S` for the search index.
    pub fn register_with_search<D, S>(mut self) -> Self
    where
        D: ResourceFacade,
        S: ResourceFacade<Model = D::Model>,
    {
        let by_purpose = self.classes.entry(D::Model::TAG.as_str()).or_default();
        by_purpose.insert(Purpose::Default, FacadeClass::of::<D>());
        by_purpose.insert(Purpose::Search, FacadeClass::of::<S>());
        self
    }

    pub fn build(self) -> FacadeRegistry {
        FacadeRegistry {
            classes: self.classes,
        }
    }
}

impl FacadeRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Facade class rendering `record` for `purpose`, or `None` (with a
    /// warning) when its table was never registered.
    pub fn get_facade_class(&self, record: &Record, purpose: Purpose) -> Option<&FacadeClass> {
        let type_name = record.tag().as_str();
        let class = self.classes.get(type_name).and_then(|c| c.get(&purpose));
        if class.is_none() {
            warn!(type_name, %purpose, "No facade registered");
        }
        class
    }

    pub fn lookup(&self, type_name: &str, purpose: Purpose) -> Result<&FacadeClass, RegistryError> {
        self.classes
            .get(type_name)
            .and_then(|c| c.get(&purpose))
            .ok_or_else(|| RegistryError::UnknownFacade {
                type_name: type_name.to_string(),
                purpose,
            })
    }

    /// Facade class whose JSON:API `type` member is `resource_type`.
    pub fn by_resource_type(&self, resource_type: &str, purpose: Purpose) -> Option<&FacadeClass> {
        self.classes
            .values()
            .filter_map(|by_purpose| by_purpose.get(&purpose))
            .find(|class| class.type_name() == resource_type)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.classes.contains_key(type_name)
    }

    /// Registered table names, sorted.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.classes.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

/// The process-wide registry of the standard facades.
pub fn registry() -> &'static FacadeRegistry {
    static REGISTRY: OnceLock<FacadeRegistry> = OnceLock::new();
    REGISTRY.get_or_init(crate::facades::standard_registry)
}

/// Shorthand for `registry().get_facade_class(record, purpose)`.
pub fn get_facade_class(record: &Record, purpose: Purpose) -> Option<&'static FacadeClass> {
    registry().get_facade_class(record, purpose)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purpose_parses() {
        assert_eq!("search".parse::<Purpose>().unwrap(), Purpose::Search);
        assert_eq!(
            "reporting".parse::<Purpose>().unwrap_err(),
            RegistryError::UnknownPurpose("reporting".to_string())
        );
    }

    #[test]
    fn test_empty_registry_misses_are_soft() {
        let registry = FacadeRegistry::builder().build();
        let record = crate::model::Language::new("fra", "Français").into_record();
        assert!(registry.get_facade_class(&record, Purpose::Default).is_none());
        assert!(matches!(
            registry.lookup("language", Purpose::Default),
            Err(RegistryError::UnknownFacade { .. })
        ));
    }
}
