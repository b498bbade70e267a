//! # Resource Facades
//!
//! A facade wraps one entity borrowed from a [`Snapshot`] together with the
//! request context, and computes its JSON:API resource object eagerly on
//! construction. Facades are cheap, immutable, and meant to be dropped once the
//! response is serialized; they never outlive the snapshot they borrow.
//!
//! Each entity type describes itself once through [`ResourceFacade`]: its
//! type names, the scalar attributes it exposes, how it is built from a create
//! payload, and its [`Relationship`] descriptors. The generic [`Facade`] does
//! the rest, the same way for every type.

use crate::framework::{
    include, registry, ApiError, Purpose, RelationshipLinks, RelationshipObject, ResourceIdentifier,
    ResourceLinks, ResourceObject, ResponseOptions,
};
use crate::index::{IndexError, IndexOperation, IndexSink};
use crate::model::{AttributeError, Attributes, EntityId, Model, Record, RelatedResources};
use crate::store::{Snapshot, StoreClient};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::marker::PhantomData;
use tracing::{debug, info, warn};

/// Request-scoped settings every facade of one response shares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacadeContext {
    /// Prepended to every link, e.g. `https://host/api/1.0`.
    pub url_prefix: String,
    /// Attach the `relationships` member (links only).
    pub with_relationship_links: bool,
    /// Also attach relationship linkage (`data`). Only meaningful together
    /// with `with_relationship_links`.
    pub with_relationship_data: bool,
}

impl FacadeContext {
    pub fn new(url_prefix: impl Into<String>) -> Self {
        Self {
            url_prefix: url_prefix.into(),
            with_relationship_links: false,
            with_relationship_data: false,
        }
    }

    pub fn with_relationships(mut self, links: bool, data: bool) -> Self {
        self.with_relationship_links = links;
        self.with_relationship_data = data;
        self
    }
}

/// Resolves the entities on the other side of a relationship.
pub type Resolver<M> = for<'a> fn(&'a Snapshot, &'a M) -> Vec<&'a Record>;

/// A navigable relationship of an entity type.
///
/// Both the identifier getter and the resource getter of a relationship go
/// through the same `resolve` function, so they always agree on which related
/// entities are included and in which order.
pub struct Relationship<M: 'static> {
    /// Relationship name as exposed in the resource (`documents`, `prev-document`).
    pub name: &'static str,
    /// Name of the backing field or association on the entity.
    pub resource_attribute: &'static str,
    pub resolve: Resolver<M>,
}

/// Per-type description of how an entity becomes a JSON:API resource.
#[async_trait]
pub trait ResourceFacade: Send + Sync + 'static {
    type Model: Model;

    /// Name of the facade itself, as shown by the registry.
    const NAME: &'static str;

    /// JSON:API `type` member.
    const TYPE: &'static str;

    /// Path segment used in links.
    const TYPE_PLURAL: &'static str;

    /// Search index namespace of this type.
    fn index_name() -> &'static str {
        Self::TYPE_PLURAL
    }

    fn make_resource_identifier(id: EntityId) -> ResourceIdentifier {
        ResourceIdentifier::new(id, Self::TYPE)
    }

    /// Fields exposed as `attributes`. Never relationship fields; search
    /// facades may denormalize labels of related entities read from `snapshot`.
    fn attributes(snapshot: &Snapshot, model: &Self::Model) -> Map<String, Value>;

    fn meta(_model: &Self::Model) -> Map<String, Value> {
        Map::new()
    }

    fn relationships() -> &'static [Relationship<Self::Model>];

    /// Builds an unsaved entity from a create payload. Missing keys stay
    /// empty; only malformed values fail here.
    fn build_model(
        id: EntityId,
        attributes: Attributes<'_>,
        related: &RelatedResources,
    ) -> Result<Self::Model, AttributeError>;

    /// Entities whose index entries embed data of this one and must be
    /// refreshed when it is reindexed with propagation.
    fn propagation_targets<'a>(
        _snapshot: &'a Snapshot,
        _model: &'a Self::Model,
    ) -> Vec<&'a Record> {
        Vec::new()
    }

    /// Point lookup wrapped in a facade.
    ///
    /// Returns `(facade, response options, errors)`: a missing entity yields
    /// `(None, {status: 404}, [404 error])`, a present one `(facade, {}, [])`.
    fn get_resource_facade<'a>(
        snapshot: &'a Snapshot,
        context: &FacadeContext,
        id: EntityId,
    ) -> (Option<Facade<'a, Self>>, ResponseOptions, Vec<ApiError>)
    where
        Self: Sized,
    {
        match snapshot.get::<Self::Model>(id) {
            Some(model) => (
                Some(Facade::new(snapshot, model, context.clone())),
                ResponseOptions::default(),
                Vec::new(),
            ),
            None => {
                debug!(entity_type = Self::TYPE, id, "Not found");
                (
                    None,
                    ResponseOptions::status(404),
                    vec![ApiError::new(404, format!("{} {} does not exist", Self::TYPE, id))],
                )
            }
        }
    }

    /// Builds an entity from a create payload and commits it in its own
    /// transaction.
    ///
    /// Any failure, while building or while committing, rolls the
    /// transaction back and is reported as a 403 error object carrying the
    /// underlying message as `detail`.
    async fn create_resource(
        store: &StoreClient,
        id: Option<EntityId>,
        attributes: &Map<String, Value>,
        related: &RelatedResources,
    ) -> Result<Self::Model, ApiError>
    where
        Self: Sized,
    {
        let entity_type = Self::Model::TAG.model_name();
        let failure = |detail: String| {
            let data = json!([id, attributes, related]);
            ApiError::new(
                403,
                format!("Error creating resource '{entity_type}' with data: {data}"),
            )
            .with_detail(detail)
        };

        let mut transaction = store.begin();
        let model = match Self::build_model(id.unwrap_or(0), Attributes::new(attributes), related) {
            Ok(model) => model,
            Err(e) => {
                warn!(entity_type, error = %e, "Create failed");
                transaction.rollback();
                return Err(failure(e.to_string()));
            }
        };
        transaction.add(model);

        match store.commit(transaction).await {
            Ok(committed) => committed
                .iter()
                .find_map(Self::Model::from_record)
                .cloned()
                .ok_or_else(|| failure("commit returned no row".to_string())),
            Err(e) => {
                warn!(entity_type, error = %e, "Create failed");
                Err(failure(e.to_string()))
            }
        }
    }
}

/// One entity rendered for one request.
pub struct Facade<'a, F: ResourceFacade> {
    snapshot: &'a Snapshot,
    model: &'a F::Model,
    context: FacadeContext,
    self_link: String,
    resource_identifier: ResourceIdentifier,
    resource: ResourceObject,
    _facade: PhantomData<F>,
}

impl<'a, F: ResourceFacade> Facade<'a, F> {
    pub fn new(snapshot: &'a Snapshot, model: &'a F::Model, context: FacadeContext) -> Self {
        let id = model.id();
        let self_link = format!("{}/{}/{}", context.url_prefix, F::TYPE_PLURAL, id);
        let resource_identifier = F::make_resource_identifier(id);
        let mut facade = Self {
            snapshot,
            model,
            resource: ResourceObject {
                id,
                type_: resource_identifier.type_.clone(),
                attributes: F::attributes(snapshot, model),
                relationships: None,
                meta: F::meta(model),
                links: ResourceLinks {
                    self_: self_link.clone(),
                },
            },
            context,
            self_link,
            resource_identifier,
            _facade: PhantomData,
        };
        if facade.context.with_relationship_links {
            facade.resource.relationships = Some(facade.exposed_relationships());
        }
        debug!(entity_type = F::TYPE, id, "Facade built");
        facade
    }

    pub fn model(&self) -> &'a F::Model {
        self.model
    }

    pub fn snapshot(&self) -> &'a Snapshot {
        self.snapshot
    }

    pub fn context(&self) -> &FacadeContext {
        &self.context
    }

    pub fn resource(&self) -> &ResourceObject {
        &self.resource
    }

    pub fn into_resource(self) -> ResourceObject {
        self.resource
    }

    pub fn resource_identifier(&self) -> &ResourceIdentifier {
        &self.resource_identifier
    }

    pub fn self_link(&self) -> &str {
        &self.self_link
    }

    pub fn relationships(&self) -> &'static [Relationship<F::Model>] {
        F::relationships()
    }

    fn relationship(&self, name: &str) -> Option<&'static Relationship<F::Model>> {
        F::relationships().iter().find(|rel| rel.name == name)
    }

    pub fn relationship_links(&self, name: &str) -> RelationshipLinks {
        RelationshipLinks {
            self_: format!("{}/relationships/{}", self.self_link, name),
            related: format!("{}/{}", self.self_link, name),
        }
    }

    /// Entities on the other side of `name`, or `None` for an unknown relationship.
    pub fn related_records(&self, name: &str) -> Option<Vec<&'a Record>> {
        let rel = self.relationship(name)?;
        Some((rel.resolve)(self.snapshot, self.model))
    }

    /// Identifier getter: one identifier per related entity, built by the
    /// related type's facade class.
    pub fn resource_identifiers(&self, name: &str) -> Option<Vec<ResourceIdentifier>> {
        let registry = registry();
        let records = self.related_records(name)?;
        Some(
            records
                .into_iter()
                .filter_map(|record| {
                    registry
                        .get_facade_class(record, Purpose::Default)
                        .map(|class| class.make_resource_identifier(record.id()))
                })
                .collect(),
        )
    }

    /// Resource getter: a full nested facade per related entity, sharing this
    /// facade's context.
    pub fn resources(&self, name: &str) -> Option<Vec<ResourceObject>> {
        let registry = registry();
        let records = self.related_records(name)?;
        Some(
            records
                .into_iter()
                .filter_map(|record| {
                    registry
                        .get_facade_class(record, Purpose::Default)?
                        .resource(self.snapshot, record, &self.context)
                })
                .collect(),
        )
    }

    /// Compound-document resources reachable within `depth` relationship hops.
    pub fn included(&self, depth: usize) -> Vec<ResourceObject> {
        match self.snapshot.lookup(F::Model::TAG, self.model.id()) {
            Some(record) => include::included(self.snapshot, record, &self.context, depth),
            None => Vec::new(),
        }
    }

    fn exposed_relationships(&self) -> BTreeMap<String, RelationshipObject> {
        F::relationships()
            .iter()
            .map(|rel| {
                let data = if self.context.with_relationship_data {
                    self.resource_identifiers(rel.name)
                } else {
                    None
                };
                let object = RelationshipObject {
                    links: self.relationship_links(rel.name),
                    data,
                };
                (rel.name.to_string(), object)
            })
            .collect()
    }

    /// Pushes this resource to the search index.
    ///
    /// With `propagate`, the entries of [`ResourceFacade::propagation_targets`]
    /// are refreshed too, through their search facades and without further
    /// propagation.
    pub async fn reindex(
        &self,
        sink: &dyn IndexSink,
        operation: IndexOperation,
        propagate: bool,
    ) -> Result<(), IndexError> {
        sink.index(F::index_name(), operation, &self.resource).await?;
        debug!(index = F::index_name(), id = self.resource.id, %operation, "Indexed");

        if !propagate {
            return Ok(());
        }
        let targets = F::propagation_targets(self.snapshot, self.model);
        let registry = registry();
        for record in &targets {
            let Some(class) = registry.get_facade_class(record, Purpose::Search) else {
                continue;
            };
            if let Some(facade) = class.build(self.snapshot, record, self.context.clone()) {
                facade.reindex(sink, IndexOperation::Update, false).await?;
            }
        }
        info!(
            entity_type = F::TYPE,
            id = self.resource.id,
            propagated = targets.len(),
            "Reindexed"
        );
        Ok(())
    }
}

/// Type-erased facade, as produced by a [`FacadeClass`](crate::framework::FacadeClass).
#[async_trait]
pub trait AnyFacade: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn index_name(&self) -> &'static str;

    fn resource(&self) -> &ResourceObject;

    fn resource_identifier(&self) -> &ResourceIdentifier;

    fn self_link(&self) -> &str;

    fn relationship_names(&self) -> Vec<&'static str>;

    fn resource_identifiers(&self, relationship: &str) -> Option<Vec<ResourceIdentifier>>;

    fn resources(&self, relationship: &str) -> Option<Vec<ResourceObject>>;

    async fn reindex(
        &self,
        sink: &dyn IndexSink,
        operation: IndexOperation,
        propagate: bool,
    ) -> Result<(), IndexError>;
}

#[async_trait]
impl<'a, F: ResourceFacade> AnyFacade for Facade<'a, F> {
    fn type_name(&self) -> &'static str {
        F::TYPE
    }

    fn index_name(&self) -> &'static str {
        F::index_name()
    }

    fn resource(&self) -> &ResourceObject {
        &self.resource
    }

    fn resource_identifier(&self) -> &ResourceIdentifier {
        &self.resource_identifier
    }

    fn self_link(&self) -> &str {
        &self.self_link
    }

    fn relationship_names(&self) -> Vec<&'static str> {
        F::relationships().iter().map(|rel| rel.name).collect()
    }

    fn resource_identifiers(&self, relationship: &str) -> Option<Vec<ResourceIdentifier>> {
        Facade::resource_identifiers(self, relationship)
    }

    fn resources(&self, relationship: &str) -> Option<Vec<ResourceObject>> {
        Facade::resources(self, relationship)
    }

    async fn reindex(
        &self,
        sink: &dyn IndexSink,
        operation: IndexOperation,
        propagate: bool,
    ) -> Result<(), IndexError> {
        Facade::reindex(self, sink, operation, propagate).await
    }
}
