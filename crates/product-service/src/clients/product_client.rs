//! # Product Client
//!
//! Provides a high‑level API for interacting with the `Product` actor.
//! It wraps a `ResourceClient<Product>` and exposes domain‑specific methods.
use crate::model::{Product, ProductFields};
use crate::product_actor::ProductError;
use async_trait::async_trait;
use collection_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            FrameworkError::DuplicateId(id) => ProductError::DuplicateId(id),
            FrameworkError::Store(e) => ProductError::StoreUnavailable(e.to_string()),
            FrameworkError::EntityError(e) => ProductError::InvalidBody(e.to_string()),
            e @ (FrameworkError::ActorClosed
            | FrameworkError::ActorDropped
            | FrameworkError::Abandoned) => {
                ProductError::ActorCommunicationError(e.to_string())
            }
        }
    }
}

impl ProductClient {
    // Create, replace and update carry a body, so they live here rather than on the trait.

    /// Stores `body` as a new product and returns it with its allocated id.
    #[instrument(skip(self))]
    pub async fn create_product(&self, body: ProductFields) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.create(body).await.map_err(Self::map_error)
    }

    /// Overwrites product `id` with `body`.
    #[instrument(skip(self))]
    pub async fn replace_product(
        &self,
        id: String,
        body: ProductFields,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.replace(id, body).await.map_err(Self::map_error)
    }

    /// Merges `body` into product `id`.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: String,
        body: ProductFields,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, body).await.map_err(Self::map_error)
    }
}
