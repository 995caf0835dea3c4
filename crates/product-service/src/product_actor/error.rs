//! Error types for the Product actor.

use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The request body is not a JSON object.
    #[error("Invalid product body: {0}")]
    InvalidBody(String),

    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The allocated id is already taken by a stored product.
    #[error("Duplicate product id: {0}")]
    DuplicateId(String),

    /// The products document could not be read or written.
    #[error("Product store unavailable: {0}")]
    StoreUnavailable(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl ProductError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ProductError::InvalidBody(_) => 400,
            ProductError::NotFound(_) => 404,
            ProductError::DuplicateId(_)
            | ProductError::StoreUnavailable(_)
            | ProductError::ActorCommunicationError(_) => 500,
        }
    }
}
