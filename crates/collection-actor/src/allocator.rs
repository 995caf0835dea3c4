//! # Identifier Allocation
//!
//! An [`IdAllocator`] picks the id of every newly created entity. It is called
//! by the actor with the freshly loaded collection, inside the same
//! load → compute → save cycle as the insert, so it always sees the current
//! members.
//!
//! | Policy | Allocator | Behavior |
//! |--------|-----------|----------|
//! | `sequential` (default) | [`SequentialIds`] | `max(high-water, largest numeric id) + 1`, never reused in-process |
//! | `uuid` | [`UuidIds`] | random v4 token |
//! | `legacy-length` | [`LengthBasedIds`] | `len + 1`, collides after deletions |
//!
//! `legacy-length` reproduces how ids were historically assigned. Once an
//! entity has been deleted it can hand out an id that is still in use; the
//! collection then refuses the insert with
//! [`FrameworkError::DuplicateId`](crate::FrameworkError::DuplicateId).

use crate::collection::Collection;
use crate::entity::ActorEntity;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

/// Derives the id for a new entity from the current collection.
pub trait IdAllocator<T: ActorEntity>: Send + Sync {
    fn next_id(&self, collection: &Collection<T>) -> T::Id;
}

/// Monotonic numeric ids.
///
/// The counter resumes above the largest numeric id in the collection, so
/// ids survive restarts, and keeps a high-water mark so that deleting the
/// newest entity does not free its id for reuse.
#[derive(Debug, Default)]
pub struct SequentialIds {
    high_water: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: ActorEntity<Id = String>> IdAllocator<T> for SequentialIds {
    fn next_id(&self, collection: &Collection<T>) -> String {
        let largest = collection
            .iter()
            .filter_map(|item| item.id().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        // Any taken id that renders as `next` parses to `next`, and `next`
        // is above every parsed id.
        let Some(next) = self
            .high_water
            .load(Ordering::SeqCst)
            .max(largest)
            .checked_add(1)
        else {
            // The numeric space is used up; a random token cannot be taken.
            warn!("Sequential ids exhausted, falling back to a random id");
            return uuid::Uuid::new_v4().to_string();
        };
        self.high_water.fetch_max(next, Ordering::SeqCst);
        next.to_string()
    }
}

/// Random v4 UUID tokens.
#[derive(Debug, Default)]
pub struct UuidIds;

impl<T: ActorEntity<Id = String>> IdAllocator<T> for UuidIds {
    fn next_id(&self, _collection: &Collection<T>) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// `len + 1` as a string.
///
/// Kept for compatibility with documents and clients that rely on the
/// historical scheme. Not unique once anything has been deleted.
#[derive(Debug, Default)]
pub struct LengthBasedIds;

impl<T: ActorEntity<Id = String>> IdAllocator<T> for LengthBasedIds {
    fn next_id(&self, collection: &Collection<T>) -> String {
        (collection.len() + 1).to_string()
    }
}

/// Which allocator a collection uses; the configuration-facing name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdPolicy {
    #[default]
    Sequential,
    Uuid,
    LegacyLength,
}

impl IdPolicy {
    pub fn allocator<T: ActorEntity<Id = String>>(self) -> Box<dyn IdAllocator<T>> {
        match self {
            IdPolicy::Sequential => Box::new(SequentialIds::new()),
            IdPolicy::Uuid => Box::new(UuidIds),
            IdPolicy::LegacyLength => Box::new(LengthBasedIds),
        }
    }
}

impl Display for IdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IdPolicy::Sequential => "sequential",
            IdPolicy::Uuid => "uuid",
            IdPolicy::LegacyLength => "legacy-length",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown id policy `{0}` (expected sequential, uuid or legacy-length)")]
pub struct UnknownIdPolicy(String);

impl FromStr for IdPolicy {
    type Err = UnknownIdPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sequential" => Ok(IdPolicy::Sequential),
            "uuid" => Ok(IdPolicy::Uuid),
            "legacy-length" => Ok(IdPolicy::LegacyLength),
            other => Err(UnknownIdPolicy(other.to_string())),
        }
    }
}
