//! The four product routes. Each performs exactly one store call.

use crate::dtos::{Envelope, ListProductsParams, ProductResponse};
use crate::error::ApiError;
use crate::middleware::ProductForm;
use crate::startup::AppState;
use axum::extract::{
    rejection::{PathRejection, QueryRejection},
    Path, Query, State,
};

/// `GET /products[?seller=...]`
pub async fn list_products(
    State(state): State<AppState>,
    params: Result<Query<ListProductsParams>, QueryRejection>,
) -> Result<Envelope<Vec<ProductResponse>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::MalformedRequest(e.body_text()))?;

    let products = state.store.list_all(params.seller_filter()).await?;

    Ok(Envelope::data(
        products.into_iter().map(ProductResponse::from).collect(),
    ))
}

/// `POST /products`
pub async fn create_product(
    State(state): State<AppState>,
    ProductForm(fields): ProductForm,
) -> Result<Envelope, ApiError> {
    let id = state.store.create_one(fields).await?;
    tracing::debug!(product_id = %id, "Create request served");

    Ok(Envelope::message("Product created successfully!"))
}

/// `PATCH /products/:id`
///
/// A well-formed id that matches nothing still reports success.
pub async fn update_product(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    ProductForm(fields): ProductForm,
) -> Result<Envelope, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::MalformedRequest(e.body_text()))?;
    state.store.update_by_id(&id, fields).await?;

    Ok(Envelope::message("Product updated successfully!"))
}

/// `DELETE /products/:id`
pub async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Envelope, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::MalformedRequest(e.body_text()))?;
    state.store.delete_by_id(&id).await?;

    Ok(Envelope::message("Product deleted successfully!"))
}
