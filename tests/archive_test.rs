use letters_archive::facades::{DocumentFacade, LanguageFacade};
use letters_archive::framework::{
    get_facade_class, registry, FacadeContext, Purpose, ResourceFacade, ResourceIdentifier,
};
use letters_archive::index::MemoryIndex;
use letters_archive::lifecycle::{self, fixtures, AppConfig, AppContext};
use letters_archive::model::{Document, Language, Model, RelatedResources, TypeTag, Whitelist};
use letters_archive::store::Snapshot;
use serde_json::json;
use std::sync::Arc;

async fn archive() -> (AppContext, Arc<MemoryIndex>) {
    let index = Arc::new(MemoryIndex::new());
    let app = AppContext::start(
        AppConfig::profile("test").unwrap(),
        Default::default(),
        index.clone(),
    );
    fixtures::load_fixtures(&app.store)
        .await
        .expect("Failed to load fixtures");
    (app, index)
}

fn full_context() -> FacadeContext {
    FacadeContext::new("https://archive.local/api/1.0").with_relationships(true, true)
}

/// Every row of every registered table gets a facade class for both purposes.
#[tokio::test]
async fn test_registry_covers_every_row() {
    let (app, _) = archive().await;
    let snapshot = app.store.snapshot().await.unwrap();

    for tag in TypeTag::ALL.iter().filter(|t| **t != TypeTag::Whitelist) {
        assert!(snapshot.count(*tag) > 0, "no fixtures for {tag}");
        for record in snapshot.scan_records(*tag) {
            for purpose in Purpose::ALL {
                let class = get_facade_class(record, purpose).expect("unregistered table");
                let facade = class
                    .build(&snapshot, record, full_context())
                    .expect("class built for another table");
                assert_eq!(facade.resource().id, record.id());
            }
        }
    }
    app.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_whitelist_is_not_exposed() {
    let record = Whitelist::default().into_record();
    assert!(get_facade_class(&record, Purpose::Default).is_none());
    assert!(registry().lookup("whitelist", Purpose::Search).is_err());
}

#[tokio::test]
async fn test_identifiers_match_resources_everywhere() {
    let (app, _) = archive().await;
    let snapshot = app.store.snapshot().await.unwrap();

    for tag in TypeTag::ALL {
        for record in snapshot.scan_records(*tag) {
            let Some(class) = get_facade_class(record, Purpose::Default) else {
                continue;
            };
            let facade = class.build(&snapshot, record, full_context()).unwrap();
            for name in facade.relationship_names() {
                let identifiers = facade.resource_identifiers(name).unwrap();
                let resources: Vec<ResourceIdentifier> = facade
                    .resources(name)
                    .unwrap()
                    .iter()
                    .map(|r| r.identifier())
                    .collect();
                assert_eq!(identifiers, resources, "{} {} {}", tag, record.id(), name);

                let data = facade.resource().relationships.as_ref().unwrap()[name]
                    .data
                    .clone()
                    .unwrap();
                assert_eq!(data, identifiers);
            }
        }
    }
    app.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_facades_are_idempotent() {
    let (app, _) = archive().await;
    let snapshot = app.store.snapshot().await.unwrap();

    let (first, _, _) = DocumentFacade::get_resource_facade(&snapshot, &full_context(), 3);
    let (second, _, _) = DocumentFacade::get_resource_facade(&snapshot, &full_context(), 3);
    let first = first.unwrap();
    let second = second.unwrap();
    assert_eq!(first.resource(), second.resource());
    assert_eq!(
        serde_json::to_string(first.resource()).unwrap(),
        serde_json::to_string(second.resource()).unwrap()
    );
    app.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_language_with_two_documents() {
    let index = Arc::new(MemoryIndex::new());
    let app = AppContext::start(AppConfig::default(), Default::default(), index);
    fixtures::add_default_users(&app.store).await.unwrap();

    let language = LanguageFacade::create_resource(
        &app.store,
        Some(1),
        json!({"code": "fra", "label": "Français"}).as_object().unwrap(),
        &RelatedResources::new(),
    )
    .await
    .unwrap();
    assert_eq!(language.id, 1);

    let mut related = RelatedResources::new();
    related.insert("owner".into(), vec![ResourceIdentifier::new(1, "user")]);
    related.insert("languages".into(), vec![ResourceIdentifier::new(1, "language")]);
    let mut documents = Vec::new();
    for title in ["Lettre A", "Lettre B"] {
        let document = DocumentFacade::create_resource(
            &app.store,
            None,
            json!({ "title": title }).as_object().unwrap(),
            &related,
        )
        .await
        .unwrap();
        documents.push(document.id);
    }

    let snapshot = app.store.snapshot().await.unwrap();
    let (facade, options, errors) = LanguageFacade::get_resource_facade(&snapshot, &full_context(), 1);
    assert_eq!(options.status, None);
    assert!(errors.is_empty());

    let resource = facade.unwrap().into_resource();
    assert_eq!(resource.attributes["code"], "fra");
    assert_eq!(resource.attributes["label"], "Français");
    let data = resource.relationships.unwrap()["documents"].data.clone().unwrap();
    assert_eq!(data.len(), 2);
    for (identifier, id) in data.iter().zip(&documents) {
        assert_eq!(identifier.type_, "document");
        assert_eq!(identifier.id, *id);
    }
    app.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_create_without_code_rolls_back() {
    let (app, _) = archive().await;
    let before = app.store.snapshot().await.unwrap().count(TypeTag::Language);

    let err = LanguageFacade::create_resource(
        &app.store,
        None,
        json!({"code": null, "label": "Sans code"}).as_object().unwrap(),
        &RelatedResources::new(),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status, 403);
    assert!(err.title.starts_with("Error creating resource 'Language' with data: "));
    assert!(err.detail.unwrap().contains("language.code"));

    let after = app.store.snapshot().await.unwrap().count(TypeTag::Language);
    assert_eq!(before, after);
    app.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_create_error_names_the_model() {
    let (app, _) = archive().await;

    let err = letters_archive::facades::PersonRoleFacade::create_resource(
        &app.store,
        None,
        json!({"description": "Sans libellé"}).as_object().unwrap(),
        &RelatedResources::new(),
    )
    .await
    .unwrap_err();
    assert!(err.title.starts_with("Error creating resource 'PersonRole' with data: "));
    assert!(err.detail.unwrap().contains("person_role.label"));
    assert_eq!(TypeTag::PersonHasRole.model_name(), "PersonHasRole");
    app.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_create_with_repeated_language_fails() {
    let (app, _) = archive().await;
    let before = app.store.snapshot().await.unwrap().count(TypeTag::Document);

    let mut related = RelatedResources::new();
    related.insert("owner".into(), vec![ResourceIdentifier::new(1, "user")]);
    related.insert(
        "languages".into(),
        vec![
            ResourceIdentifier::new(1, "language"),
            ResourceIdentifier::new(1, "language"),
        ],
    );
    let err = DocumentFacade::create_resource(
        &app.store,
        None,
        json!({"title": "Lettre"}).as_object().unwrap(),
        &related,
    )
    .await
    .unwrap_err();
    assert_eq!(err.status, 403);
    assert!(err.detail.unwrap().contains("document.language_id"));
    assert_eq!(app.store.snapshot().await.unwrap().count(TypeTag::Document), before);
    app.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_create_with_wrong_relationship_type_fails() {
    let (app, _) = archive().await;
    let before = app.store.snapshot().await.unwrap().count(TypeTag::Document);

    let mut related = RelatedResources::new();
    related.insert("owner".into(), vec![ResourceIdentifier::new(1, "person")]);
    let err = DocumentFacade::create_resource(
        &app.store,
        None,
        json!({"title": "Lettre"}).as_object().unwrap(),
        &related,
    )
    .await
    .unwrap_err();
    assert_eq!(err.status, 403);
    assert_eq!(app.store.snapshot().await.unwrap().count(TypeTag::Document), before);
    app.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reindex_single_index() {
    let (app, index) = archive().await;
    let snapshot = app.store.snapshot().await.unwrap();

    lifecycle::reindex(&app, "documents,persons", "https://old.archive.local")
        .await
        .unwrap();
    let documents: Vec<_> = (1..=snapshot.count(TypeTag::Document) as u32)
        .map(|id| index.get("documents", id))
        .collect();
    let persons: Vec<_> = (1..=snapshot.count(TypeTag::Person) as u32)
        .map(|id| index.get("persons", id))
        .collect();
    assert!(documents.iter().chain(&persons).all(Option::is_some));

    let reports = lifecycle::reindex(&app, "languages", "https://archive.local")
        .await
        .unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].count, snapshot.count(TypeTag::Language));

    assert_eq!(
        index.deleted_indexes(),
        vec!["documents".to_string(), "persons".to_string(), "languages".to_string()]
    );
    assert_eq!(
        index.index_names(),
        vec!["documents".to_string(), "languages".to_string(), "persons".to_string()]
    );
    assert_eq!(index.len("languages"), snapshot.count(TypeTag::Language));
    let entry = index.get("languages", 1).unwrap();
    assert_eq!(entry["links"]["self"], "https://archive.local/api/1.0/languages/1");

    // untouched entries keep the links they were indexed with
    for (id, before) in documents.iter().enumerate() {
        assert_eq!(&index.get("documents", id as u32 + 1), before);
    }
    for (id, before) in persons.iter().enumerate() {
        assert_eq!(&index.get("persons", id as u32 + 1), before);
    }
    assert_eq!(
        index.get("documents", 1).unwrap()["links"]["self"],
        "https://old.archive.local/api/1.0/documents/1"
    );
    app.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reindex_all_skips_undeclared() {
    let (app, index) = archive().await;
    let snapshot = app.store.snapshot().await.unwrap();

    let reports = lifecycle::reindex(&app, "documents,notes", "").await.unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(index.len("documents"), snapshot.count(TypeTag::Document));
    assert!(index.is_empty("notes"));

    // the search facade is used for documents
    let entry = index.get("documents", 1).unwrap();
    assert!(entry["attributes"].get("transcription").is_none());
    assert!(entry["attributes"]["languages"].is_array());
    app.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reindex_with_propagation() {
    let (app, index) = archive().await;
    let snapshot = app.store.snapshot().await.unwrap();
    let context = app.facade_context("");

    let language = snapshot.get::<Language>(2).unwrap();
    let facade = letters_archive::framework::Facade::<LanguageFacade>::new(&snapshot, language, context);
    facade
        .reindex(&*index, letters_archive::index::IndexOperation::Update, true)
        .await
        .unwrap();

    let written_in_latin = snapshot
        .scan::<Document>()
        .filter(|d| d.language_ids.contains(&2))
        .count();
    assert_eq!(index.len("languages"), 1);
    assert_eq!(index.len("documents"), written_in_latin);
    app.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_show_document_with_included() {
    let (app, _) = archive().await;

    let document = lifecycle::show(&app, "document", 2, Purpose::Default, true)
        .await
        .unwrap();
    let data = document.data.as_ref().unwrap();
    assert_eq!(data.links.self_, "/api/1.0/documents/2");
    assert!(!document.included.is_empty());
    assert!(!document
        .included
        .iter()
        .any(|r| r.type_ == "document" && r.id == 2));

    let mut seen = std::collections::HashSet::new();
    for resource in &document.included {
        assert!(seen.insert((resource.type_.clone(), resource.id)), "duplicate {resource:?}");
    }

    let missing = lifecycle::show(&app, "person-role", 99, Purpose::Default, false)
        .await
        .unwrap();
    assert!(missing.data.is_none());
    assert_eq!(missing.errors[0].status, 404);
    assert_eq!(missing.errors[0].title, "person-role 99 does not exist");
    app.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_create_database_seeds_default_users() {
    let path = std::env::temp_dir().join(format!("letters-archive-{}.json", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let users = fixtures::create_database(8, &path, false).await.unwrap();
    assert_eq!(users, vec![1, 2]);

    let snapshot: Snapshot =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(snapshot.count(TypeTag::UserRole), 3);
    assert_eq!(snapshot.count(TypeTag::User), 2);
    assert_eq!(snapshot.count(TypeTag::Document), 0);

    let err = fixtures::create_database(8, &path, false).await.unwrap_err();
    assert!(matches!(err, fixtures::FixtureError::AlreadyExists(_)));

    // recreate replaces the file with the same seeded archive
    std::fs::write(&path, "{}").unwrap();
    fixtures::create_database(8, &path, true).await.unwrap();
    let recreated: Snapshot =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(recreated, snapshot);

    let _ = std::fs::remove_file(&path);
}
