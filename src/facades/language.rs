use super::{object, referencing};
use crate::framework::{Relationship, ResourceFacade};
use crate::model::{AttributeError, Attributes, Document, EntityId, Language, Record, RelatedResources};
use crate::store::Snapshot;
use serde_json::{json, Map, Value};

pub struct LanguageFacade;

const RELATIONSHIPS: &[Relationship<Language>] = &[Relationship {
    name: "documents",
    resource_attribute: "documents",
    resolve: documents,
}];

fn documents<'a>(snapshot: &'a Snapshot, language: &'a Language) -> Vec<&'a Record> {
    referencing::<Document>(snapshot, |d| d.language_ids.contains(&language.id))
}

impl ResourceFacade for LanguageFacade {
    type Model = Language;
    const NAME: &'static str = "LanguageFacade";
    const TYPE: &'static str = "language";
    const TYPE_PLURAL: &'static str = "languages";

    fn attributes(_snapshot: &Snapshot, language: &Language) -> Map<String, Value> {
        object(json!({
            "code": language.code,
            "label": language.label,
        }))
    }

    fn relationships() -> &'static [Relationship<Language>] {
        RELATIONSHIPS
    }

    fn build_model(
        id: EntityId,
        attributes: Attributes<'_>,
        _related: &RelatedResources,
    ) -> Result<Language, AttributeError> {
        Ok(Language {
            id,
            code: attributes.string("code")?,
            label: attributes.string("label")?,
        })
    }

    /// Search entries of documents carry language labels.
    fn propagation_targets<'a>(snapshot: &'a Snapshot, language: &'a Language) -> Vec<&'a Record> {
        documents(snapshot, language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facades::test_data;
    use crate::framework::{FacadeContext, ResourceIdentifier};

    fn context() -> FacadeContext {
        FacadeContext::new("/api/1.0").with_relationships(true, true)
    }

    #[test]
    fn test_resource_shape() {
        let snapshot = test_data::archive();
        let (facade, options, errors) = LanguageFacade::get_resource_facade(&snapshot, &context(), 1);
        let facade = facade.unwrap();
        assert_eq!(options.status, None);
        assert!(errors.is_empty());

        let resource = facade.resource();
        assert_eq!(resource.id, 1);
        assert_eq!(resource.type_, "language");
        assert_eq!(resource.attributes["code"], "fra");
        assert_eq!(resource.attributes["label"], "Français");
        assert_eq!(resource.links.self_, "/api/1.0/languages/1");

        let documents = &resource.relationships.as_ref().unwrap()["documents"];
        assert_eq!(documents.links.self_, "/api/1.0/languages/1/relationships/documents");
        assert_eq!(documents.links.related, "/api/1.0/languages/1/documents");
        assert_eq!(
            documents.data.as_deref().unwrap(),
            &[ResourceIdentifier::new(1, "document"), ResourceIdentifier::new(2, "document")]
        );
    }

    #[test]
    fn test_missing_language_is_404() {
        let snapshot = test_data::archive();
        let (facade, options, errors) = LanguageFacade::get_resource_facade(&snapshot, &context(), 42);
        assert!(facade.is_none());
        assert_eq!(options.status, Some(404));
        assert_eq!(errors[0].status, 404);
        assert_eq!(errors[0].title, "language 42 does not exist");
    }

    #[test]
    fn test_links_without_data() {
        let snapshot = test_data::archive();
        let ctx = FacadeContext::new("").with_relationships(true, false);
        let (facade, _, _) = LanguageFacade::get_resource_facade(&snapshot, &ctx, 2);
        let relationships = facade.unwrap().into_resource().relationships.unwrap();
        assert!(relationships["documents"].data.is_none());
    }

    #[test]
    fn test_no_relationships_member_by_default() {
        let snapshot = test_data::archive();
        let (facade, _, _) = LanguageFacade::get_resource_facade(&snapshot, &FacadeContext::new(""), 2);
        assert!(facade.unwrap().resource().relationships.is_none());
    }
}
