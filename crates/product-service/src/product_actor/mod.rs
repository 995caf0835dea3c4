//! # Product Actor
//!
//! Wires the [`Product`] resource into the generic collection actor.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](collection_actor::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use collection_actor::{IdPolicy, MemoryStore};
//! use product_service::model::ProductFields;
//! use product_service::product_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = product_actor::new(Arc::new(MemoryStore::new()), IdPolicy::Sequential, 32);
//!     tokio::spawn(actor.run());
//!
//!     let body = ProductFields::from_slice(br#"{"name": "Lamp"}"#)?;
//!     let product = client.create_product(body).await?;
//!     assert_eq!(product.id, "1");
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use collection_actor::{DocumentStore, IdPolicy, ResourceActor};
use std::sync::Arc;

/// Creates a new Product actor over `store` and its client.
pub fn new(
    store: Arc<dyn DocumentStore<Product>>,
    id_policy: IdPolicy,
    buffer: usize,
) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(buffer, store, id_policy.allocator());
    (actor, ProductClient::new(generic_client))
}
