//! Persisted entities of the letters archive.
//!
//! Every table gets a plain struct (`Language`, `Document`, ...) and a variant in
//! [`Record`], the arena value stored by the [`Snapshot`](crate::store::Snapshot).
//! Relationships are kept as foreign-key ids; reverse relationships are resolved
//! by scanning the owning table, so cyclic graphs never hold references to each other.
//!
//! An `id` of `0` means "not yet assigned": the store hands out the next id of
//! the table when such a record is committed.

pub mod attributes;
pub mod collection;
pub mod document;
pub mod image;
pub mod institution;
pub mod language;
pub mod note;
pub mod person;
pub mod person_has_role;
pub mod person_role;
pub mod user;
pub mod user_role;
pub mod whitelist;
pub mod witness;

pub use attributes::*;
pub use collection::*;
pub use document::*;
pub use image::*;
pub use institution::*;
pub use language::*;
pub use note::*;
pub use person::*;
pub use person_has_role::*;
pub use person_role::*;
pub use user::*;
pub use user_role::*;
pub use whitelist::*;
pub use witness::*;

use crate::store::{Snapshot, StoreError};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Primary key of every table.
pub type EntityId = u32;

/// Implemented by every table struct. Generated by `records!`, except for
/// [`Constraints`] which each table writes by hand.
pub trait Model: Constraints + Clone + Debug + Send + Sync + 'static {
    /// Table this struct is stored in.
    const TAG: TypeTag;

    fn id(&self) -> EntityId;

    /// Borrows the struct back out of an arena record of the same table.
    fn from_record(record: &Record) -> Option<&Self>;

    fn into_record(self) -> Record;
}

/// Column constraints, checked by the store when a transaction commits.
pub trait Constraints {
    fn check_constraints(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
}

macro_rules! records {
    ($($variant:ident => $table:literal),* $(,)?) => {
        /// Table name of a record.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum TypeTag {
            $(#[serde(rename = $table)] $variant,)*
        }

        impl TypeTag {
            pub const ALL: &'static [TypeTag] = &[$(TypeTag::$variant),*];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(TypeTag::$variant => $table,)*
                }
            }

            /// Struct name of the table's model, e.g. `PersonRole`.
            pub fn model_name(self) -> &'static str {
                match self {
                    $(TypeTag::$variant => stringify!($variant),)*
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($table => Some(TypeTag::$variant),)*
                    _ => None,
                }
            }
        }

        /// One row of any table.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "table")]
        pub enum Record {
            $(#[serde(rename = $table)] $variant($variant),)*
        }

        impl Record {
            pub fn tag(&self) -> TypeTag {
                match self {
                    $(Record::$variant(_) => TypeTag::$variant,)*
                }
            }

            pub fn id(&self) -> EntityId {
                match self {
                    $(Record::$variant(m) => m.id,)*
                }
            }

            pub(crate) fn assign_id(&mut self, id: EntityId) {
                match self {
                    $(Record::$variant(m) => m.id = id,)*
                }
            }

            pub(crate) fn check_constraints(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
                match self {
                    $(Record::$variant(m) => m.check_constraints(snapshot),)*
                }
            }
        }

        $(
            impl Model for $variant {
                const TAG: TypeTag = TypeTag::$variant;

                fn id(&self) -> EntityId {
                    self.id
                }

                fn from_record(record: &Record) -> Option<&Self> {
                    match record {
                        Record::$variant(m) => Some(m),
                        _ => None,
                    }
                }

                fn into_record(self) -> Record {
                    Record::$variant(self)
                }
            }
        )*
    };
}

records! {
    Collection => "collection",
    Document => "document",
    Note => "note",
    Witness => "witness",
    Institution => "institution",
    Image => "image",
    Language => "language",
    Person => "person",
    PersonRole => "person_role",
    PersonHasRole => "person_has_role",
    User => "user",
    UserRole => "user_role",
    Whitelist => "whitelist",
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Column checks shared by the tables
// =============================================================================

pub(crate) fn not_null<T>(
    table: TypeTag,
    column: &'static str,
    value: &Option<T>,
) -> Result<(), StoreError> {
    match value {
        Some(_) => Ok(()),
        None => Err(StoreError::NotNull {
            table: table.as_str(),
            column,
        }),
    }
}

pub(crate) fn max_len(
    table: TypeTag,
    column: &'static str,
    value: &Option<String>,
    max: usize,
) -> Result<(), StoreError> {
    match value {
        Some(v) if v.chars().count() > max => Err(StoreError::ValueTooLong {
            table: table.as_str(),
            column,
            max,
        }),
        _ => Ok(()),
    }
}

pub(crate) fn references(
    snapshot: &Snapshot,
    table: TypeTag,
    column: &'static str,
    target: TypeTag,
    id: Option<EntityId>,
) -> Result<(), StoreError> {
    match id {
        Some(id) if snapshot.lookup(target, id).is_none() => Err(StoreError::ForeignKey {
            table: table.as_str(),
            column,
            target: target.as_str(),
            id,
        }),
        _ => Ok(()),
    }
}

/// Association rows are keyed by the pair of ids, so a list may not repeat one.
pub(crate) fn distinct(
    table: TypeTag,
    column: &'static str,
    ids: &[EntityId],
) -> Result<(), StoreError> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    match ids.iter().find(|id| !seen.insert(**id)) {
        Some(id) => Err(StoreError::Unique {
            table: table.as_str(),
            column,
            value: id.to_string(),
        }),
        None => Ok(()),
    }
}

/// Fails when another row of `M` carries the same non-null value in `column`.
pub(crate) fn unique<M: Model>(
    snapshot: &Snapshot,
    row: &M,
    column: &'static str,
    value: impl Fn(&M) -> Option<&str>,
) -> Result<(), StoreError> {
    let Some(own) = value(row) else {
        return Ok(());
    };
    let clash = snapshot
        .scan::<M>()
        .any(|other| other.id() != row.id() && value(other) == Some(own));
    if clash {
        return Err(StoreError::Unique {
            table: M::TAG.as_str(),
            column,
            value: own.to_string(),
        });
    }
    Ok(())
}
