//! Product HTTP Routes
//!
//! | Method | Path | Success |
//! |--------|------|---------|
//! | GET | `/products` | 200, the whole collection |
//! | POST | `/products` | 201, the created product |
//! | GET | `/products/:id` | 200 |
//! | PUT | `/products/:id` | 200, the replaced product |
//! | PATCH | `/products/:id` | 200, the updated product |
//! | DELETE | `/products/:id` | 204, empty body |
//!
//! Other methods on these paths answer 405, HEAD included, any other path 404.
//! Bodies are decoded before the store is touched.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use collection_actor::ActorClient;

use super::error::ApiError;
use crate::clients::ProductClient;
use crate::model::{Product, ProductFields};

/// Routes for the products collection, with the 404 fallback for everything else.
pub fn product_routes(client: ProductClient) -> Router {
    Router::new()
        .route(
            "/products",
            get(list_products)
                .head(method_not_allowed)
                .post(create_product)
                .fallback(method_not_allowed),
        )
        .route(
            "/products/:id",
            get(get_product)
                .head(method_not_allowed)
                .put(replace_product)
                .patch(update_product)
                .delete(delete_product)
                .fallback(method_not_allowed),
        )
        .fallback(route_not_found)
        .with_state(client)
}

// ==================
// Handlers
// ==================

async fn list_products(
    State(client): State<ProductClient>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(client.list().await?))
}

async fn get_product(
    State(client): State<ProductClient>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(client.get(id).await?))
}

async fn create_product(
    State(client): State<ProductClient>,
    body: Bytes,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let fields = ProductFields::from_slice(&body)?;
    let product = client.create_product(fields).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn replace_product(
    State(client): State<ProductClient>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Product>, ApiError> {
    let fields = ProductFields::from_slice(&body)?;
    Ok(Json(client.replace_product(id, fields).await?))
}

async fn update_product(
    State(client): State<ProductClient>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Product>, ApiError> {
    let fields = ProductFields::from_slice(&body)?;
    Ok(Json(client.update_product(id, fields).await?))
}

async fn delete_product(
    State(client): State<ProductClient>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    client.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}
