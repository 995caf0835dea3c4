//! # Product Service Library
//!
//! The products collection served over HTTP. This library exposes the
//! modules of the binary for integration testing.
//!
//! - [`model`] - [`Product`](model::Product) and its request payloads
//! - [`product_actor`] - wiring into the collection actor, [`ProductError`](product_actor::ProductError)
//! - [`clients`] - [`ProductClient`](clients::ProductClient)
//! - [`lifecycle`] - [`ProductSystem`](lifecycle::ProductSystem)
//! - [`http`] - routes, error responses, server
//! - [`config`] - [`ServiceConfig`](config::ServiceConfig) and the CLI

pub mod clients;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod product_actor;
