use std::sync::Arc;

use collection_actor::{DocumentStore, IdPolicy, JsonFileStore, StoreError};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::clients::ProductClient;
use crate::config::ServiceConfig;
use crate::model::Product;
use crate::product_actor;

/// The running product actor and the client to reach it.
///
/// # Example
///
/// ```ignore
/// let system = ProductSystem::start(&config).await?;
///
/// let product = system.product_client.create_product(body).await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct ProductSystem {
    /// Client for interacting with the Product actor
    pub product_client: ProductClient,

    /// Task handle of the actor (used for graceful shutdown)
    handle: JoinHandle<()>,
}

impl ProductSystem {
    /// Opens `config.data_file` and starts the actor over it.
    pub async fn start(config: &ServiceConfig) -> Result<Self, StoreError> {
        let store = JsonFileStore::open(&config.data_file, config.init_if_missing).await?;
        info!(
            path = %config.data_file.display(),
            id_policy = %config.id_policy,
            "Opened product store"
        );
        Ok(Self::with_store(
            Arc::new(store),
            config.id_policy,
            config.channel_buffer,
        ))
    }

    /// Starts the actor over an already opened store.
    pub fn with_store(
        store: Arc<dyn DocumentStore<Product>>,
        id_policy: IdPolicy,
        channel_buffer: usize,
    ) -> Self {
        let (actor, product_client) = product_actor::new(store, id_policy, channel_buffer);
        let handle = tokio::spawn(actor.run());
        Self {
            product_client,
            handle,
        }
    }

    /// Drops this system's client and waits for the actor to drain and exit.
    ///
    /// Returns an error if the actor task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.product_client);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
