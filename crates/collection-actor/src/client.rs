//! # Generic Client
//!
//! This module defines the generic client for a collection: mutations are
//! forwarded to the owning actor, reads load the document directly.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response};
use crate::operations;
use crate::store::DocumentStore;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// ## ResourceClient
///
/// The `ResourceClient<T>` provides a type‑safe, async API for a collection
/// managed by a `ResourceActor<T>`.
///
/// * **Cloneable** – holds only a sender and a shared store handle.
/// * **Mutations** – `create`, `replace`, `update` and `delete` are sent to the
///   actor over a bounded mpsc channel and answered on a oneshot channel.
/// * **Reads** – `list` and `get` load the document themselves, so any number
///   of reads run in parallel without queueing behind writes.
#[derive(Clone)]
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
    store: Arc<dyn DocumentStore<T>>,
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>, store: Arc<dyn DocumentStore<T>>) -> Self {
        Self { sender, store }
    }

    /// The whole collection, in insertion order.
    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        Ok(self.store.load().await?.into_vec())
    }

    pub async fn get(&self, id: T::Id) -> Result<T, FrameworkError> {
        let collection = self.store.load().await?;
        operations::get(&collection, &id)
    }

    pub async fn create(&self, params: T::Create) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn replace(&self, id: T::Id, params: T::Replace) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Replace {
            id,
            params,
            respond_to,
        })
        .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    async fn request<R>(
        &self,
        message: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(message(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}
