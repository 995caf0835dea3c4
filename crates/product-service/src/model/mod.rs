//! Pure data structures implementing the [`ActorEntity`](collection_actor::ActorEntity) trait.

pub mod product;

pub use product::*;
