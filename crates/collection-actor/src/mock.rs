//! # Mock Framework & Testing Guide
//!
//! Utilities for testing code that sits on top of a collection without
//! running the real actor, and for exercising the actor against a store that
//! misbehaves on demand.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | Mock client | Real Actor |
//! |---------|-------------|------------|
//! | **Determinism** | 100% Deterministic | Subject to scheduler |
//! | **State** | Whatever the test replies | Real load → compute → save |
//! | **Use Case** | Client wrappers, error mapping | The actor itself or the full system |
//! | **Error Injection** | Reply with any `FrameworkError` | [`FaultyStore`] |
//!
//! ## Pattern 0: Client Logic Test
//!
//! [`create_mock_client`] returns a real `ResourceClient` whose mutations land
//! on a receiver the test holds. `expect_*` pulls the next message and hands
//! back its payload and responder:
//!
//! ```rust,ignore
//! let (client, mut receiver) = create_mock_client::<Product>(10);
//! let task = tokio::spawn(async move { client.create(params).await });
//!
//! let (params, responder) = expect_create(&mut receiver).await.unwrap();
//! responder.send(Ok(product)).unwrap();
//! ```
//!
//! Reads on a mock client load from a fresh [`MemoryStore`]; use
//! [`create_mock_client_with_store`] to seed it.
//!
//! ## Pattern 1: Fault Injection
//!
//! Wrap any store in a [`FaultyStore`] to fail loads or saves, or to slow
//! saves down so that overlapping requests are guaranteed to overlap.

use crate::collection::Collection;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::store::{DocumentStore, MemoryStore, StoreError};
use crate::ResourceClient;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// Responder handed back by the `expect_*` helpers.
pub type Responder<R> = oneshot::Sender<Result<R, FrameworkError>>;

/// Creates a mock client and a receiver for asserting requests.
///
/// Reads go to an empty [`MemoryStore`].
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    create_mock_client_with_store(buffer_size, Arc::new(MemoryStore::new()))
}

/// Like [`create_mock_client`], with reads served by `store`.
pub fn create_mock_client_with_store<T: ActorEntity>(
    buffer_size: usize,
    store: Arc<dyn DocumentStore<T>>,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender, store), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Responder<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Replace request
pub async fn expect_replace<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Replace, Responder<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Replace {
            id,
            params,
            respond_to,
        }) => Some((id, params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, Responder<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Responder<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// A store wrapper that fails or stalls on demand.
#[derive(Debug)]
pub struct FaultyStore<S> {
    inner: S,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
    save_delay_ms: AtomicU64,
    saves: AtomicUsize,
}

impl<S> FaultyStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            fail_loads: AtomicBool::new(false),
            fail_saves: AtomicBool::new(false),
            save_delay_ms: AtomicU64::new(0),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Sleeps this long before every save reaches the inner store.
    pub fn delay_saves(&self, delay: Duration) {
        self.save_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// Saves that reached the inner store.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn injected() -> StoreError {
        StoreError::Unavailable {
            path: PathBuf::from("faulty"),
            source: std::io::Error::other("injected failure"),
        }
    }
}

#[async_trait]
impl<T, S> DocumentStore<T> for FaultyStore<S>
where
    T: ActorEntity,
    S: DocumentStore<T>,
{
    async fn load(&self) -> Result<Collection<T>, StoreError> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(Self::injected());
        }
        self.inner.load().await
    }

    async fn save(&self, collection: &Collection<T>) -> Result<(), StoreError> {
        let delay = self.save_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(Self::injected());
        }
        self.inner.save(collection).await?;
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::tests::{note, Note};

    #[tokio::test]
    async fn mock_client_routes_mutations_to_receiver() {
        let (client, mut receiver) = create_mock_client::<Note>(10);

        let create_task = tokio::spawn(async move { client.create("Test".to_string()).await });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload, "Test");
        responder.send(Ok(note("1", "Test"))).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result.unwrap(), note("1", "Test"));
    }

    #[tokio::test]
    async fn mock_client_reads_from_seeded_store() {
        let store = Arc::new(MemoryStore::new());
        DocumentStore::<Note>::save(store.as_ref(), &Collection::from(vec![note("7", "seeded")]))
            .await
            .unwrap();
        let (client, _receiver) = create_mock_client_with_store::<Note>(10, store);

        assert_eq!(client.get("7".to_string()).await.unwrap(), note("7", "seeded"));
    }

    #[tokio::test]
    async fn closed_receiver_reports_actor_closed() {
        let (client, receiver) = create_mock_client::<Note>(10);
        drop(receiver);
        let err = client.delete("1".to_string()).await.unwrap_err();
        assert!(matches!(err, FrameworkError::ActorClosed));
    }

    #[tokio::test]
    async fn dropped_responder_reports_actor_dropped() {
        let (client, mut receiver) = create_mock_client::<Note>(10);
        let task = tokio::spawn(async move { client.delete("1".to_string()).await });

        let (id, responder) = expect_delete(&mut receiver).await.unwrap();
        assert_eq!(id, "1");
        drop(responder);

        assert!(matches!(task.await.unwrap(), Err(FrameworkError::ActorDropped)));
    }
}
