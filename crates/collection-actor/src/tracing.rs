//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: `Actor started` and `Shutdown`
//! - **Mutations**: `Create`, `Replace`, `Update`, `Delete` at debug with the
//!   full payload, then `Created`/`Replaced`/`Updated`/`Deleted` at info with
//!   the id and collection size
//! - **Failures**: warn with the entity id and `error = %e`
//! - **Store I/O**: `Loaded`/`Saved` at debug with path and size
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run                            # compact, one line per mutation
//! RUST_LOG=debug cargo run                           # payloads and store I/O
//! RUST_LOG=collection_actor=debug,info cargo run     # debug for the framework only
//! ```
//!
//! With no `RUST_LOG` set, the filter defaults to `info`.

use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact()
        .init();
}
