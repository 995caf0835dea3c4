//! Type-safe wrappers around [`ResourceClient`](collection_actor::ResourceClient).

pub mod product_client;

pub use product_client::*;
