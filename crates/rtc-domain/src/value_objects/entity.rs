//! Entity identity value objects

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Canonical string form of an entity identifier
///
/// Identifiers reach the cache in many shapes (string slugs, integer primary
/// keys, UUIDs). They are normalized here once so that equivalent identifiers
/// always build the same cache key: integers in decimal, UUIDs lowercase
/// hyphenated, strings untouched.
///
/// ```
/// use rtc_domain::value_objects::EntityId;
///
/// assert_eq!(EntityId::from(42_u64), EntityId::from("42"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Wrap an already canonical identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&String> for EntityId {
    fn from(id: &String) -> Self {
        Self(id.clone())
    }
}

impl From<&EntityId> for EntityId {
    fn from(id: &EntityId) -> Self {
        id.clone()
    }
}

impl From<Uuid> for EntityId {
    fn from(id: Uuid) -> Self {
        Self(id.hyphenated().to_string())
    }
}

macro_rules! entity_id_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for EntityId {
                fn from(id: $ty) -> Self {
                    Self(id.to_string())
                }
            }
        )*
    };
}

entity_id_from_integer!(u16, u32, u64, u128, usize, i16, i32, i64, i128, isize);

/// Address of one entity in the backing store
///
/// A `(collection, identifier)` pair. The collection is the logical store
/// name (table, model, document collection).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    /// Backing store collection name
    pub collection: String,
    /// Normalized identifier
    pub id: EntityId,
}

impl EntityRef {
    /// Create a reference from a collection name and any identifier shape
    pub fn new(collection: impl Into<String>, id: impl Into<EntityId>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Reference to an entity of type `E`
    pub fn of<E: crate::repositories::CacheableEntity>(id: impl Into<EntityId>) -> Self {
        Self::new(E::collection(), id)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}
