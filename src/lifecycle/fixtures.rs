//! Deterministic demo data.
//!
//! Everything goes through the facades' `create_resource`, so the fixtures
//! exercise the same write path as API clients do. Running them twice on an
//! empty store produces the same snapshot.

use crate::facades::{
    CollectionFacade, DocumentFacade, ImageFacade, InstitutionFacade, LanguageFacade, NoteFacade,
    PersonFacade, PersonHasRoleFacade, PersonRoleFacade, UserFacade, UserRoleFacade,
    WitnessFacade,
};
use crate::framework::{ApiError, ResourceFacade, ResourceIdentifier};
use crate::model::{EntityId, RelatedResources};
use crate::store::{Snapshot, StoreActor, StoreClient, StoreError};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error(transparent)]
    Create(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to serialize snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} already exists, use db-recreate to replace it")]
    AlreadyExists(PathBuf),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Row counts of a fixture run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixtureSummary {
    pub users: usize,
    pub languages: usize,
    pub collections: usize,
    pub persons: usize,
    pub documents: usize,
}

const LANGUAGES: &[(&str, &str)] = &[
    ("fra", "Français"),
    ("lat", "Latin"),
    ("ita", "Italien"),
    ("spa", "Espagnol"),
];

const COLLECTIONS: &[(&str, &str)] = &[
    ("Correspondance diplomatique", "Lettres échangées avec les ambassadeurs"),
    ("Lettres de Catherine de Médicis", "Lettres autographes et copies"),
];

const PERSONS: &[(&str, &str, &str)] = &[
    ("Catherine", "de Médicis", "medicis-catherine"),
    ("Charles", "IX", "charles-ix"),
    ("Philippe", "II", "philippe-ii"),
    ("Sébastien", "de L'Aubespine", "aubespine-sebastien"),
];

const DOCUMENT_COUNT: usize = 5;

fn attributes(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Builds relationship payloads from `(relationship, type, id)` triples.
fn related(links: &[(&str, &str, EntityId)]) -> RelatedResources {
    let mut related = RelatedResources::new();
    for (name, type_, id) in links {
        related
            .entry(name.to_string())
            .or_default()
            .push(ResourceIdentifier::new(*id, *type_));
    }
    related
}

async fn create<F: ResourceFacade>(
    store: &StoreClient,
    value: Value,
    links: &[(&str, &str, EntityId)],
) -> Result<F::Model, ApiError> {
    F::create_resource(store, None, &attributes(value), &related(links)).await
}

/// Default user roles and the administrator account.
pub async fn add_default_users(store: &StoreClient) -> Result<Vec<EntityId>, ApiError> {
    let admin_role = create::<UserRoleFacade>(
        store,
        json!({"label": "admin", "description": "Administrator"}),
        &[],
    )
    .await?;
    let contributor_role = create::<UserRoleFacade>(
        store,
        json!({"label": "contributor", "description": "Contributor"}),
        &[],
    )
    .await?;
    create::<UserRoleFacade>(
        store,
        json!({"label": "visitor", "description": "Visitor"}),
        &[],
    )
    .await?;

    let admin = create::<UserFacade>(
        store,
        json!({
            "username": "admin",
            "email": "admin@archive.local",
            "password": "pbkdf2:sha256:admin",
            "first-name": "Admin",
            "last-name": "Archive",
        }),
        &[("role", "user-role", admin_role.id)],
    )
    .await?;
    let contributor = create::<UserFacade>(
        store,
        json!({
            "username": "contributor",
            "email": "contributor@archive.local",
            "password": "pbkdf2:sha256:contributor",
            "first-name": "Claire",
            "last-name": "Contributrice",
        }),
        &[("role", "user-role", contributor_role.id)],
    )
    .await?;
    Ok(vec![admin.id, contributor.id])
}

/// Loads the demo archive into `store`.
pub async fn load_fixtures(store: &StoreClient) -> Result<FixtureSummary, ApiError> {
    let users = add_default_users(store).await?;
    let owner = users[0];

    let mut languages = Vec::new();
    for (code, label) in LANGUAGES {
        let language =
            create::<LanguageFacade>(store, json!({"code": code, "label": label}), &[]).await?;
        languages.push(language.id);
    }

    let mut collections = Vec::new();
    for (title, description) in COLLECTIONS {
        let collection = create::<CollectionFacade>(
            store,
            json!({"title": title, "description": description}),
            &[],
        )
        .await?;
        collections.push(collection.id);
    }

    let mut institutions = Vec::new();
    for (name, reference) in [
        ("Archives nationales", "https://www.archives-nationales.culture.gouv.fr"),
        ("BnF", "https://www.bnf.fr"),
    ] {
        let institution =
            create::<InstitutionFacade>(store, json!({"name": name, "ref": reference}), &[])
                .await?;
        institutions.push(institution.id);
    }

    let sender = create::<PersonRoleFacade>(store, json!({"label": "expéditeur"}), &[]).await?;
    let recipient =
        create::<PersonRoleFacade>(store, json!({"label": "destinataire"}), &[]).await?;

    let mut persons = Vec::new();
    for (firstname, lastname, key) in PERSONS {
        let person = create::<PersonFacade>(
            store,
            json!({"firstname": firstname, "lastname": lastname, "key": key}),
            &[],
        )
        .await?;
        persons.push(person.id);
    }

    let mut prev: Option<EntityId> = None;
    for n in 0..DOCUMENT_COUNT {
        let mut links = vec![
            ("owner", "user", owner),
            ("languages", "language", languages[n % languages.len()]),
            ("collections", "collection", collections[n % collections.len()]),
        ];
        if n % 2 == 0 {
            links.push(("languages", "language", languages[1]));
        }
        if let Some(id) = prev {
            links.push(("prev-document", "document", id));
        }
        let document = create::<DocumentFacade>(
            store,
            json!({
                "title": format!("Lettre {}", n + 1),
                "argument": format!("Argument de la lettre {}", n + 1),
                "creation": format!("157{n}-0{}-1{n}", n + 1),
                "creation-label": format!("157{n}"),
                "location-date-label": "Paris",
                "transcription": format!("Transcription de la lettre {}", n + 1),
                "is-published": n % 2 == 0,
            }),
            &links,
        )
        .await?;

        let witness = create::<WitnessFacade>(
            store,
            json!({
                "content": format!("Original de la lettre {}", n + 1),
                "tradition": "original",
                "status": "base",
                "classification-mark": format!("Fr. {}", 3000 + n),
            }),
            &[
                ("document", "document", document.id),
                ("institution", "institution", institutions[n % institutions.len()]),
            ],
        )
        .await?;
        create::<ImageFacade>(
            store,
            json!({
                "canvas-idx": n,
                "manifest-url": format!("https://iiif.archive.local/{}/manifest.json", witness.id),
            }),
            &[("witness", "witness", witness.id)],
        )
        .await?;
        create::<NoteFacade>(
            store,
            json!({"content": format!("Note sur la lettre {}", n + 1), "label": "date"}),
            &[("document", "document", document.id)],
        )
        .await?;

        for (role, person) in [
            (sender.id, persons[n % persons.len()]),
            (recipient.id, persons[(n + 1) % persons.len()]),
        ] {
            create::<PersonHasRoleFacade>(
                store,
                json!({}),
                &[
                    ("person", "person", person),
                    ("document", "document", document.id),
                    ("person-role", "person-role", role),
                ],
            )
            .await?;
        }
        prev = Some(document.id);
    }

    let summary = FixtureSummary {
        users: users.len(),
        languages: languages.len(),
        collections: collections.len(),
        persons: persons.len(),
        documents: DOCUMENT_COUNT,
    };
    info!(?summary, "Fixtures loaded");
    Ok(summary)
}

/// Writes the current snapshot of `store` as pretty JSON.
pub async fn dump_snapshot(store: &StoreClient, path: &Path) -> Result<(), FixtureError> {
    let snapshot = store.snapshot().await?;
    let json = serde_json::to_string_pretty(snapshot.as_ref())?;
    fs::write(path, json).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), version = snapshot.version(), "Snapshot written");
    Ok(())
}

/// Writes a fresh archive holding only the default roles and users to `path`.
///
/// The archive is built on its own store, independent of any loaded data.
/// An existing file is kept unless `overwrite` is set.
pub async fn create_database(
    store_buffer: usize,
    path: &Path,
    overwrite: bool,
) -> Result<Vec<EntityId>, FixtureError> {
    if !overwrite && path.exists() {
        return Err(FixtureError::AlreadyExists(path.to_path_buf()));
    }
    let (actor, store) = StoreActor::new(store_buffer, Snapshot::new());
    tokio::spawn(actor.run());

    let users = add_default_users(&store).await?;
    dump_snapshot(&store, path).await?;
    info!(path = %path.display(), overwrite, "Database created");
    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Document, TypeTag};

    #[tokio::test]
    async fn test_fixtures_are_deterministic() {
        let mut snapshots = Vec::new();
        for _ in 0..2 {
            let (actor, store) = StoreActor::new(8, Snapshot::new());
            tokio::spawn(actor.run());
            let summary = load_fixtures(&store).await.unwrap();
            assert_eq!(summary.documents, DOCUMENT_COUNT);
            snapshots.push(store.snapshot().await.unwrap());
        }
        assert_eq!(snapshots[0], snapshots[1]);

        let snapshot = &snapshots[0];
        assert_eq!(snapshot.count(TypeTag::UserRole), 3);
        assert_eq!(snapshot.count(TypeTag::Witness), DOCUMENT_COUNT);
        assert_eq!(snapshot.count(TypeTag::PersonHasRole), 2 * DOCUMENT_COUNT);
        let last = snapshot.get::<Document>(DOCUMENT_COUNT as EntityId).unwrap();
        assert_eq!(last.prev_document_id, Some(DOCUMENT_COUNT as EntityId - 1));
    }
}
