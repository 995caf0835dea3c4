//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the single writer of a collection
//! document. It implements the "Server" side of the Actor Model: mutations
//! arrive as messages and are executed strictly one after another.

use crate::allocator::IdAllocator;
use crate::client::ResourceClient;
use crate::collection::Collection;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response};
use crate::operations;
use crate::store::DocumentStore;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that owns every write to a collection document.
///
/// # Concurrency Model
///
/// Each mutation is a whole-document read-modify-write. Running two of them
/// at once would lose updates (see [`crate::store`]). The actor is the one
/// mutual-exclusion boundary that prevents this: it receives a message, runs
/// `load → compute → save` to completion, replies, and only then receives
/// the next message. No lock is needed because no other task writes.
///
/// Reads do not pass through the actor. `ResourceClient::list`/`get` load
/// the document directly, concurrently with each other and with an in-flight
/// mutation; atomic saves mean they see the state before or after it.
///
/// # Cancellation
///
/// Once a message has been queued, the cycle belongs to the actor. If the
/// requester gives up, the cycle (including its save) still completes and the
/// reply is dropped. Nothing is ever rolled back.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Run**: Spawn `actor.run()` in a background task.
/// 3.  **Use**: Clone the client freely; drop every clone to stop the actor.
///
/// ```rust
/// use collection_actor::{ActorEntity, IdPolicy, MemoryStore, ResourceActor};
/// use serde::{Deserialize, Serialize};
/// use std::sync::Arc;
///
/// #[derive(Clone, Debug, Serialize, Deserialize)]
/// struct Tag { id: String, label: String }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("tag error")]
/// struct TagError;
///
/// impl ActorEntity for Tag {
///     type Id = String;
///     type Create = String;
///     type Replace = String;
///     type Update = String;
///     type Error = TagError;
///
///     fn id(&self) -> &String { &self.id }
///     fn from_create_params(id: String, label: String) -> Result<Self, TagError> { Ok(Self { id, label }) }
///     fn from_replace_params(id: String, label: String) -> Result<Self, TagError> { Ok(Self { id, label }) }
///     fn on_update(&mut self, label: String) -> Result<(), TagError> { self.label = label; Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let store = Arc::new(MemoryStore::new());
///     let (actor, client) = ResourceActor::<Tag>::new(10, store, IdPolicy::Sequential.allocator());
///     tokio::spawn(actor.run());
///
///     let tag = client.create("rust".to_string()).await.unwrap();
///     assert_eq!(tag.id, "1");
///     assert_eq!(client.list().await.unwrap().len(), 1);
/// }
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: Arc<dyn DocumentStore<T>>,
    allocator: Box<dyn IdAllocator<T>>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   mutating calls on the client wait until there is space.
    /// * `store` - The document this actor writes. The client reads it directly.
    /// * `allocator` - Picks the id of every created entity.
    pub fn new(
        buffer_size: usize,
        store: Arc<dyn DocumentStore<T>>,
        allocator: Box<dyn IdAllocator<T>>,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let client = ResourceClient::new(sender, store.clone());
        let actor = Self {
            receiver,
            store,
            allocator,
        };
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    pub async fn run(self) {
        let Self {
            mut receiver,
            store,
            allocator,
        } = self;
        let store = store.as_ref();

        // Extract just the type name (e.g., "Product" instead of "product_service::model::product::Product")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = mutate(entity_type, store, &respond_to, |collection| {
                        let id = allocator.next_id(collection);
                        operations::create(collection, id, params)
                    })
                    .await;
                    match &result {
                        Ok((item, size)) => info!(entity_type, id = %item.id(), size, "Created"),
                        Err(FrameworkError::Abandoned) => {
                            debug!(entity_type, "Create skipped, requester gone")
                        }
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    respond(entity_type, respond_to, result.map(|(item, _)| item));
                }
                ResourceRequest::Replace {
                    id,
                    params,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?params, "Replace");
                    let result = mutate(entity_type, store, &respond_to, |collection| {
                        operations::replace(collection, &id, params)
                    })
                    .await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Replaced"),
                        Err(FrameworkError::Abandoned) => {
                            debug!(entity_type, %id, "Replace skipped, requester gone")
                        }
                        Err(e) => warn!(entity_type, %id, error = %e, "Replace failed"),
                    }
                    respond(entity_type, respond_to, result.map(|(item, _)| item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = mutate(entity_type, store, &respond_to, |collection| {
                        operations::update(collection, &id, update)
                    })
                    .await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(FrameworkError::Abandoned) => {
                            debug!(entity_type, %id, "Update skipped, requester gone")
                        }
                        Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                    }
                    respond(entity_type, respond_to, result.map(|(item, _)| item));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = mutate(entity_type, store, &respond_to, |collection| {
                        operations::delete(collection, &id)
                    })
                    .await;
                    match &result {
                        Ok((_, size)) => info!(entity_type, %id, size, "Deleted"),
                        Err(FrameworkError::Abandoned) => {
                            debug!(entity_type, %id, "Delete skipped, requester gone")
                        }
                        Err(e) => warn!(entity_type, %id, error = %e, "Delete failed"),
                    }
                    respond(entity_type, respond_to, result.map(|_| ()));
                }
            }
        }

        info!(entity_type, "Shutdown");
    }
}

/// One read-modify-write cycle. Nothing is saved unless `op` succeeds.
///
/// A requester that is gone before the load returns gets no side effect:
/// the cycle stops with [`FrameworkError::Abandoned`]. Once the save is
/// issued it runs to completion.
///
/// Returns the operation's result and the collection size after the save.
async fn mutate<T, R, S>(
    entity_type: &str,
    store: &dyn DocumentStore<T>,
    respond_to: &Response<S>,
    op: impl FnOnce(&mut Collection<T>) -> Result<R, FrameworkError> + Send,
) -> Result<(R, usize), FrameworkError>
where
    T: ActorEntity,
    S: Send,
{
    if respond_to.is_closed() {
        return Err(FrameworkError::Abandoned);
    }
    let mut collection = store.load().await?;
    if respond_to.is_closed() {
        return Err(FrameworkError::Abandoned);
    }
    let duplicates = collection.duplicate_ids();
    if !duplicates.is_empty() {
        warn!(entity_type, ?duplicates, "Document holds duplicate ids");
    }
    let result = op(&mut collection)?;
    store.save(&collection).await?;
    Ok((result, collection.len()))
}

fn respond<R>(entity_type: &str, respond_to: Response<R>, result: Result<R, FrameworkError>) {
    if respond_to.send(result).is_err() {
        debug!(entity_type, "Requester gone, result discarded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::{IdPolicy, LengthBasedIds};
    use crate::collection::tests::{note, Note};
    use crate::mock::FaultyStore;
    use crate::store::MemoryStore;

    fn spawn_with(store: Arc<dyn DocumentStore<Note>>, allocator: Box<dyn IdAllocator<Note>>) -> ResourceClient<Note> {
        let (actor, client) = ResourceActor::new(8, store, allocator);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn full_lifecycle_against_memory_store() {
        let store = Arc::new(MemoryStore::new());
        let client = spawn_with(store.clone(), IdPolicy::Sequential.allocator());

        let created = client.create("hello".to_string()).await.unwrap();
        assert_eq!(created, note("1", "hello"));

        let updated = client.update("1".to_string(), " world".to_string()).await.unwrap();
        assert_eq!(updated.text, "hello world");

        let replaced = client.replace("1".to_string(), "bye".to_string()).await.unwrap();
        assert_eq!(replaced, note("1", "bye"));
        assert_eq!(client.get("1".to_string()).await.unwrap(), replaced);

        client.delete("1".to_string()).await.unwrap();
        assert!(client.list().await.unwrap().is_empty());
        assert_eq!(store.document().await, b"[]".to_vec());
    }

    #[tokio::test]
    async fn failed_save_is_reported_and_document_unchanged() {
        let store = Arc::new(FaultyStore::new(MemoryStore::new()));
        let client = spawn_with(store.clone(), IdPolicy::Sequential.allocator());
        client.create("kept".to_string()).await.unwrap();
        let before = store.inner().document().await;

        store.fail_saves(true);
        let err = client.create("lost".to_string()).await.unwrap_err();
        assert!(matches!(err, FrameworkError::Store(_)));

        store.fail_saves(false);
        assert_eq!(store.inner().document().await, before);
        assert_eq!(client.list().await.unwrap(), vec![note("1", "kept")]);
    }

    #[tokio::test]
    async fn failed_load_leaves_nothing_behind() {
        let store = Arc::new(FaultyStore::new(MemoryStore::new()));
        let client = spawn_with(store.clone(), IdPolicy::Sequential.allocator());

        store.fail_loads(true);
        assert!(matches!(
            client.create("x".to_string()).await,
            Err(FrameworkError::Store(_))
        ));
        assert_eq!(store.saves(), 0);
    }

    #[tokio::test]
    async fn legacy_allocator_collision_is_refused() {
        let store = Arc::new(MemoryStore::new());
        let client = spawn_with(store.clone(), Box::new(LengthBasedIds));
        for text in ["a", "b", "c"] {
            client.create(text.to_string()).await.unwrap();
        }
        client.delete("1".to_string()).await.unwrap();

        // len + 1 = "3", which is still taken.
        let err = client.create("d".to_string()).await.unwrap_err();
        assert!(matches!(err, FrameworkError::DuplicateId(id) if id == "3"));
        assert_eq!(client.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn abandoned_request_still_completes() {
        let store = Arc::new(FaultyStore::new(MemoryStore::new()));
        store.delay_saves(std::time::Duration::from_millis(50));
        let client = spawn_with(store.clone(), IdPolicy::Sequential.allocator());

        // Give up on the request while its save is in progress.
        let pending = client.create("orphan".to_string());
        let _ = tokio::time::timeout(std::time::Duration::from_millis(10), pending).await;

        // The next mutation queues behind the abandoned one.
        let second = client.create("next".to_string()).await.unwrap();
        assert_eq!(second.id, "2");
        let ids: Vec<_> = client.list().await.unwrap().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[tokio::test]
    async fn request_abandoned_while_queued_has_no_effect() {
        let store = Arc::new(FaultyStore::new(MemoryStore::new()));
        store.delay_saves(std::time::Duration::from_millis(200));
        let client = spawn_with(store.clone(), IdPolicy::Sequential.allocator());

        let first = {
            let client = client.clone();
            tokio::spawn(async move { client.create("A".to_string()).await })
        };
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        // B waits behind A's slow save and is given up on before it runs.
        let queued = client.create("B".to_string());
        let _ = tokio::time::timeout(std::time::Duration::from_millis(10), queued).await;

        first.await.unwrap().unwrap();
        // Anything behind B runs only after B has been dealt with.
        let third = client.create("C".to_string()).await.unwrap();
        assert_eq!(third.id, "2");

        let texts: Vec<_> = client.list().await.unwrap().into_iter().map(|n| n.text).collect();
        assert_eq!(texts, ["A", "C"]);
        assert_eq!(store.saves(), 2);
    }

    #[tokio::test]
    async fn actor_stops_when_clients_drop() {
        let (actor, client) =
            ResourceActor::<Note>::new(8, Arc::new(MemoryStore::new()), IdPolicy::Sequential.allocator());
        let handle = tokio::spawn(actor.run());
        drop(client);
        handle.await.unwrap();
    }
}
