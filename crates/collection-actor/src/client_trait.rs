//! # ActorClient Trait
//!
//! Provides a common interface for resource‑specific clients, adding default
//! `list`, `get` and `delete` methods built on top of a generic
//! `ResourceClient`, with framework errors mapped into the resource's own
//! error type.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the standard operations.
///
/// The operations whose payloads need resource-specific conversion (create,
/// replace, update) are left to the implementor.
///
/// # Example
///
/// ```rust
/// use collection_actor::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
///
/// #[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// struct Tag { id: String }
///
/// #[derive(Debug, thiserror::Error)]
/// enum TagError {
///     #[error("tag {0} not found")]
///     NotFound(String),
///     #[error("{0}")]
///     Other(String),
/// }
///
/// impl ActorEntity for Tag {
///     type Id = String;
///     type Create = ();
///     type Replace = ();
///     type Update = ();
///     type Error = TagError;
///
///     fn id(&self) -> &String { &self.id }
///     fn from_create_params(id: String, _: ()) -> Result<Self, TagError> { Ok(Self { id }) }
///     fn from_replace_params(id: String, _: ()) -> Result<Self, TagError> { Ok(Self { id }) }
///     fn on_update(&mut self, _: ()) -> Result<(), TagError> { Ok(()) }
/// }
///
/// struct TagClient {
///     inner: ResourceClient<Tag>,
/// }
///
/// impl ActorClient<Tag> for TagClient {
///     type Error = TagError;
///
///     fn inner(&self) -> &ResourceClient<Tag> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> TagError {
///         match e {
///             FrameworkError::NotFound(id) => TagError::NotFound(id),
///             other => TagError::Other(other.to_string()),
///         }
///     }
/// }
///
/// // list(), get() and delete() are provided automatically.
/// async fn usage(client: TagClient) {
///     let _ = client.list().await;
///     let _ = client.get("1".to_string()).await;
///     let _ = client.delete("1".to_string()).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch the whole collection.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Loading collection");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<T, Self::Error> {
        tracing::debug!("Loading collection");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
