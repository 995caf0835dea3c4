//! # HTTP Server
//!
//! Binds the product routes to a TCP listener.

use std::future::Future;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::routes::product_routes;
use crate::clients::ProductClient;
use crate::config::ServiceConfig;

/// HTTP server for the products collection
pub struct HttpServer {
    addr: String,
    router: Router,
}

impl HttpServer {
    pub fn new(config: &ServiceConfig, client: ProductClient) -> Self {
        Self {
            addr: config.socket_addr(),
            router: Self::build_router(client),
        }
    }

    /// Build the router with request tracing
    pub fn build_router(client: ProductClient) -> Router {
        product_routes(client).layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> &str {
        &self.addr
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serves requests until `shutdown` resolves, then lets in-flight requests finish.
    pub async fn serve<F>(self, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.addr.as_str()).await?;
        info!(addr = %listener.local_addr()?, "Server is listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
    }
}
