//! Entity trait implementation for the Product domain type.
//!
//! This module contains the [`ActorEntity`] implementation that lets
//! [`Product`] be managed by the generic
//! [`ResourceActor`](collection_actor::ResourceActor).
//!
//! See the trait implementation on [`Product`] for method documentation.

use super::ProductError;
use crate::model::{Product, ProductFields, ID_FIELD};
use collection_actor::ActorEntity;

impl ActorEntity for Product {
    type Id = String;
    type Create = ProductFields;
    type Replace = ProductFields;
    type Update = ProductFields;
    type Error = ProductError;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new Product from the request body under the allocated id.
    fn from_create_params(id: String, params: ProductFields) -> Result<Self, ProductError> {
        Ok(Self::new(id, params))
    }

    /// The body becomes the whole product; only the path id survives.
    fn from_replace_params(id: String, params: ProductFields) -> Result<Self, ProductError> {
        Ok(Self::new(id, params))
    }

    /// Merges a partial body into the product.
    ///
    /// # Fields Updated
    /// Every field in the body except `id`, overwriting or adding.
    /// Fields the body does not mention keep their values.
    fn on_update(&mut self, update: ProductFields) -> Result<(), ProductError> {
        for (key, value) in update.0 {
            if key != ID_FIELD {
                self.fields.insert(key, value);
            }
        }
        Ok(())
    }
}
