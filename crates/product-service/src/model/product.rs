//! The product resource and its request payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::product_actor::ProductError;

/// The key the service owns on every product.
pub const ID_FIELD: &str = "id";

/// Represents a product in the catalog.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](collection_actor::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](collection_actor::ResourceActor).
///
/// A product is an open-ended JSON object. Only `id` is known to the service;
/// every other field is carried through untouched, in the order it arrived.
///
/// See [`impl ActorEntity for Product`](#impl-ActorEntity-for-Product) for how
/// create, replace and update payloads ([`ProductFields`]) become products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Product {
    /// Creates a new Product instance, dropping any `id` inside `fields`.
    pub fn new(id: impl Into<String>, fields: ProductFields) -> Self {
        Self {
            id: id.into(),
            fields: fields.without_id(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// A request body: a JSON object with arbitrary fields.
///
/// Used as the payload for create, replace and partial update. Whatever it
/// says about `id` never reaches the stored product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFields(pub Map<String, Value>);

impl ProductFields {
    /// Decodes a raw request body. Anything but a JSON object is rejected.
    pub fn from_slice(body: &[u8]) -> Result<Self, ProductError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| ProductError::InvalidBody(e.to_string()))?;
        Self::try_from(value)
    }

    /// The fields in order, minus `id`.
    pub fn without_id(self) -> Map<String, Value> {
        self.0
            .into_iter()
            .filter(|(key, _)| key != ID_FIELD)
            .collect()
    }
}

impl TryFrom<Value> for ProductFields {
    type Error = ProductError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ProductError::InvalidBody(format!(
                "expected a JSON object, got {}",
                kind(&other)
            ))),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
