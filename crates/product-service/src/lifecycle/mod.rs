//! # System Lifecycle
//!
//! Starting and stopping the product actor.
//!
//! ## Startup
//!
//! [`ProductSystem::start`] opens the document named in the config (writing
//! an empty collection first if allowed and needed), builds the configured id
//! allocator and spawns the actor. [`ProductSystem::with_store`] does the same
//! over any [`DocumentStore`](collection_actor::DocumentStore), which is how
//! tests run the whole system in memory.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop every client** - closes the sender side of the channel
//! 2. **Actor drains** - queued mutations still run their full cycle
//! 3. **Await completion** - [`ProductSystem::shutdown`] waits for the task
//!
//! Clones of the client held elsewhere (the HTTP router, for one) keep the
//! actor alive, so the server must stop before the system shuts down.

pub mod product_system;

pub use product_system::*;
