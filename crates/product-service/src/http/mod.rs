//! HTTP surface: routes, error responses and the server.

pub mod error;
pub mod routes;
pub mod server;

pub use error::{ApiError, ErrorResponse};
pub use routes::product_routes;
pub use server::HttpServer;
