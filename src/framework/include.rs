//! Compound documents: the `included` member of a response.
//!
//! Walks relationships breadth-first from the primary record, up to a fixed
//! depth, taking related resources from each facade's resource getter.
//! Every `(type, id)` pair is included at most once and the primary resource
//! is never repeated, so cycles such as `prev-document` / `next-document`
//! terminate.

use crate::framework::{registry, FacadeContext, Purpose, ResourceObject};
use crate::model::{EntityId, Record, TypeTag};
use crate::store::Snapshot;
use std::collections::HashSet;
use tracing::debug;

/// Related resources of `record`, `depth` relationship hops deep.
pub fn included(
    snapshot: &Snapshot,
    record: &Record,
    context: &FacadeContext,
    depth: usize,
) -> Vec<ResourceObject> {
    let registry = registry();
    let mut visited: HashSet<(TypeTag, EntityId)> = HashSet::from([(record.tag(), record.id())]);
    let mut frontier = vec![record];
    let mut resources = Vec::new();

    for _ in 0..depth {
        let mut next = Vec::new();
        for current in frontier {
            let Some(facade) = registry
                .get_facade_class(current, Purpose::Default)
                .and_then(|class| class.build(snapshot, current, context.clone()))
            else {
                continue;
            };
            for name in facade.relationship_names() {
                for resource in facade.resources(name).unwrap_or_default() {
                    let Some(other) = registry
                        .by_resource_type(&resource.type_, Purpose::Default)
                        .and_then(|class| snapshot.lookup(class.table(), resource.id))
                    else {
                        continue;
                    };
                    if visited.insert((other.tag(), other.id())) {
                        resources.push(resource);
                        next.push(other);
                    }
                }
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next;
    }

    debug!(
        type_name = %record.tag(),
        id = record.id(),
        count = resources.len(),
        "Included resources"
    );
    resources
}
