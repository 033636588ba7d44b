//! Product handlers.
//!
//! Each handler extracts only the table access it is granted: reads take
//! [`ReadAccess`], writes take [`WriteAccess`].

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use products_core::product::{parse_put_request, Product, ProductList};

use super::error::{ApiError, Message};
use crate::{
    config::Config,
    state::{ReadAccess, WriteAccess},
};

/// Create or replace a product (PUT /{id}).
pub async fn put_product(
    State(WriteAccess(writer)): State<WriteAccess>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let product = parse_put_request(&id, &body)?;

    writer
        .put_product(&product)
        .await
        .map_err(|e| ApiError::repository(e, "Failed to create product"))?;

    tracing::info!(product_id = %product.id, name = %product.name, price = product.price, "Stored product");

    Ok((StatusCode::CREATED, Json(Message::new("Product created"))))
}

/// Get a single product (GET /{id}).
pub async fn get_product(
    State(ReadAccess(reader)): State<ReadAccess>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    tracing::debug!(product_id = %id, "Fetching product");

    reader
        .get_product(&id)
        .await
        .map_err(|e| ApiError::repository(e, "Error fetching product"))?
        .map(Json)
        .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, "Product not found"))
}

/// List products (GET /).
pub async fn list_products(
    State(ReadAccess(reader)): State<ReadAccess>,
    State(config): State<Config>,
) -> Result<Json<ProductList>, ApiError> {
    let products = reader
        .list_products(config.scan_limit)
        .await
        .map_err(|e| ApiError::repository(e, "Failed to get products"))?;

    tracing::debug!(count = products.len(), limit = config.scan_limit, "Listed products");

    Ok(Json(ProductList::from(products)))
}

/// Delete a product (DELETE /{id}).
pub async fn delete_product(
    State(WriteAccess(writer)): State<WriteAccess>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    writer
        .delete_product(&id)
        .await
        .map_err(|e| ApiError::repository(e, "Failed to delete product"))?;

    tracing::info!(product_id = %id, "Deleted product");

    Ok(Json(Message::new("Product deleted")))
}

/// Fallback for paths no declared route matches.
pub async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Not found")
}

/// Fallback for a declared path hit with a method it does not serve.
pub async fn method_not_allowed() -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}
