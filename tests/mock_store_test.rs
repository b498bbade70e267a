use letters_archive::facades::{LanguageFacade, NoteFacade};
use letters_archive::framework::ResourceFacade;
use letters_archive::model::{Language, Model, RelatedResources};
use letters_archive::store::mock::MockStore;
use letters_archive::store::StoreError;
use serde_json::json;

/// A store failure during commit surfaces as a 403 error object.
#[tokio::test]
async fn test_commit_failure_is_reported_as_403() {
    let mut mock = MockStore::new();
    mock.expect_commit().return_err(StoreError::Unique {
        table: "language",
        column: "code",
        value: "fra".into(),
    });

    let err = LanguageFacade::create_resource(
        &mock.client(),
        None,
        json!({"code": "fra"}).as_object().unwrap(),
        &RelatedResources::new(),
    )
    .await
    .unwrap_err();

    assert_eq!(err.status, 403);
    assert_eq!(
        err.detail.as_deref(),
        Some("UNIQUE constraint failed: language.code ('fra')")
    );
    mock.verify();
}

#[tokio::test]
async fn test_store_gone_is_reported_as_403() {
    let mut mock = MockStore::new();
    mock.expect_commit().return_err(StoreError::ActorDropped);

    let err = LanguageFacade::create_resource(
        &mock.client(),
        Some(4),
        json!({"code": "ita"}).as_object().unwrap(),
        &RelatedResources::new(),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status, 403);
    assert!(err.title.contains("[4,"));
    mock.verify();
}

#[tokio::test]
async fn test_committed_row_is_returned() {
    let mut mock = MockStore::new();
    let mut committed = Language::new("lat", "Latin");
    committed.id = 12;
    mock.expect_commit().return_ok(vec![committed.clone().into_record()]);

    let language = LanguageFacade::create_resource(
        &mock.client(),
        None,
        json!({"code": "lat", "label": "Latin"}).as_object().unwrap(),
        &RelatedResources::new(),
    )
    .await
    .unwrap();
    assert_eq!(language, committed);
    mock.verify();
}

/// Malformed payloads fail before anything reaches the store.
#[tokio::test]
async fn test_malformed_payload_never_commits() {
    let mock = MockStore::new();

    let err = NoteFacade::create_resource(
        &mock.client(),
        None,
        json!({"content": 42}).as_object().unwrap(),
        &RelatedResources::new(),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status, 403);
    assert_eq!(err.detail.as_deref(), Some("attribute 'content' must be a string"));
    mock.verify();
}
