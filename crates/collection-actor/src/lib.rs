//! # Collection Actor
//!
//! This crate manages a collection of resources persisted as **one document**.
//! Every mutation reads the whole document, changes it, and writes the whole
//! document back. The crate's job is to make that read-modify-write cycle
//! safe under concurrency.
//!
//! ## Why an Actor?
//!
//! Two overlapping read-modify-write cycles lose an update: both load the
//! same snapshot and the second save erases the first one's change (see
//! [`store`]). Rather than lock around every cycle, the crate gives the
//! document a single writer:
//!
//! - A [`ResourceActor`] runs in its own Tokio task and owns all writes.
//! - Mutations are messages; the actor runs each one's
//!   `load → compute → save` to completion before receiving the next.
//! - Reads skip the queue and load the document directly. Saves are atomic,
//!   so a read sees the state before or after a mutation, never half of it.
//!
//! **Further Reading**:
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - the resource type and its pure hooks
//! 2. **Operations** ([`operations`]) - pure List/Get/Create/Replace/Update/Delete over a [`Collection`]
//! 3. **Persistence** ([`DocumentStore`]) - whole-document load/save ([`JsonFileStore`], [`MemoryStore`])
//! 4. **Identity** ([`IdAllocator`]) - ids for created entities, chosen by [`IdPolicy`]
//! 5. **Runtime Layer** ([`ResourceActor`]) - the single writer
//! 6. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - type-safe access
//!
//! ## Testing
//!
//! The [`mock`] module provides mock clients for testing wrappers without an
//! actor, and [`mock::FaultyStore`] for injecting store failures.

pub mod actor;
pub mod allocator;
pub mod client;
pub mod client_trait;
pub mod collection;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod operations;
pub mod store;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use allocator::{IdAllocator, IdPolicy, LengthBasedIds, SequentialIds, UuidIds};
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use collection::Collection;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use store::{DocumentStore, JsonFileStore, MemoryStore, StoreError};
