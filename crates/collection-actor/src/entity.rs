//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract every resource stored in a
//! collection document must implement to be managed by the generic
//! `ResourceActor`. It names the id type and the three request payloads
//! (create, replace, partial update), and it supplies the pure hooks that
//! turn a payload into the next stored value.
//!
//! # Architecture Note
//! By defining a contract (`ActorEntity`) that every resource type satisfies,
//! the load → compute → save cycle in [`crate::ResourceActor`] is written
//! *once* and reused for any collection.
//!
//! Associated types keep payloads apart at compile time: a `Product`
//! collection accepts a `ProductCreate`, never some other resource's payload.
//!
//! # Id Ownership
//! Hooks receive the id they must carry. The framework owns ids: whatever a
//! payload says about `id` is overridden by the allocator (create) or the
//! request path (replace), and ignored on update.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// Entities are (de)serialized as members of the persisted collection, hence
/// the `Serialize + DeserializeOwned` bounds.
pub trait ActorEntity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// The unique identifier for this entity.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance (DTO - Data Transfer Object).
    type Create: Send + Sync + Debug;

    /// The data that wholly replaces an existing instance.
    type Replace: Send + Sync + Debug;

    /// A partial change merged into an existing instance.
    type Update: Send + Sync + Debug;

    /// The error type for this entity.
    ///
    /// # Design Note: Error Granularity
    ///
    /// One error enum per entity rather than one per operation. Clients deal
    /// with a single error type, at the cost of some precision.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The id this entity is stored under.
    fn id(&self) -> &Self::Id;

    /// Construct the full entity from a freshly allocated id and the payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Construct the entity that takes the place of the one stored under `id`.
    /// Nothing from the previous value survives except the id.
    fn from_replace_params(id: Self::Id, params: Self::Replace) -> Result<Self, Self::Error>;

    /// Merge a partial update into this entity. Must not change the id.
    fn on_update(&mut self, update: Self::Update) -> Result<(), Self::Error>;
}
