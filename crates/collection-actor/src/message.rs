//! # Generic Messages
//!
//! This module defines the messages a `ResourceClient` sends to its
//! `ResourceActor`. Only mutations travel as messages: reads go straight to
//! the store.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// A mutating request, executed by the actor as one load → compute → save cycle.
///
/// # Resource-Oriented Architecture
/// The variants map onto the write half of CRUD. Each carries the payload
/// type the entity declared for it, so a payload for one resource type can
/// never be sent to another resource's actor.
///
/// - **Create**: Allocates an id and appends a new entity.
/// - **Replace**: Wholly replaces the entity under `id`.
/// - **Update**: Merges a partial change into the entity under `id`.
/// - **Delete**: Removes the entity under `id`.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Replace {
        id: T::Id,
        params: T::Replace,
        respond_to: Response<T>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}
