//! # Framework Errors
//!
//! This module defines the common error types used throughout the collection
//! framework. Store failures, lookup failures and channel failures all travel
//! as a [`FrameworkError`], so every resource client maps from one enum.

use crate::store::StoreError;

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    /// The requester was gone before the document was loaded; nothing ran.
    #[error("Request abandoned before it ran")]
    Abandoned,
    #[error("Item not found: {0}")]
    NotFound(String),
    /// The allocated id is already taken; the collection refused the insert.
    #[error("Duplicate id: {0}")]
    DuplicateId(String),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}
