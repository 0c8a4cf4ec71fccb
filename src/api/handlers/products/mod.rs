//! Product CRUD handlers.
//!
//! Every handler runs its rule set through [`validation::gate`] before the
//! repository is touched, then maps the single repository call it makes onto
//! the response envelope. Writes keyed by id never look the row up first: a
//! `None`/`false` from the repository is the 404.
//!
//! Routes that ignore the body still parse it, so malformed JSON answers 400
//! on every route before the id is validated.

use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
};

use crate::{
    api::{
        extract::{JsonBody, RawId},
        response::{
            ApiError, DeletedResponse, ErrorResponse, MSG_DELETED, ProductListResponse,
            ProductResponse,
        },
    },
    product::{
        ProductDraft, SharedRepository,
        validation::{self, CREATE_PRODUCT, PRODUCT_ID, RequestInput, UPDATE_PRODUCT, ValidationErrors},
    },
};

mod types;

pub use types::{CreateProductRequest, UpdateProductRequest};


/// An id that passed `IsInt` but overflows `i64` cannot name a stored row.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| ApiError::NotFound)
}

fn gate_id(raw: &str) -> Result<i64, ApiError> {
    validation::gate(PRODUCT_ID, &RequestInput::new().with_param("id", raw))?;
    parse_id(raw)
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "All products, newest first", body = ProductListResponse),
    ),
    tag = "Products"
)]
pub async fn get_products(
    repo: Extension<SharedRepository>,
    JsonBody(_body): JsonBody,
) -> Result<Json<ProductListResponse>, ApiError> {
    let data = repo.list().await?;
    Ok(Json(ProductListResponse { data }))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "The ID of the product to retrieve")),
    responses(
        (status = 200, description = "Successful response", body = ProductResponse),
        (status = 400, description = "Bad request - invalid ID", body = ValidationErrors),
        (status = 404, description = "Not found", body = ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn get_product_by_id(
    repo: Extension<SharedRepository>,
    RawId(raw_id): RawId,
    JsonBody(_body): JsonBody,
) -> Result<Json<ProductResponse>, ApiError> {
    let id = gate_id(&raw_id)?;
    let data = repo.find(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(ProductResponse { data }))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created successfully", body = ProductResponse),
        (status = 400, description = "Bad request - invalid input", body = ValidationErrors),
    ),
    tag = "Products"
)]
pub async fn create_product(
    repo: Extension<SharedRepository>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let input = RequestInput::new().with_body(body);
    validation::gate(CREATE_PRODUCT, &input)?;

    let draft = ProductDraft::from_body(input.body())?;
    let data = repo.create(&draft).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse { data })))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "The ID of the product to update")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated successfully", body = ProductResponse),
        (status = 400, description = "Bad request - invalid ID or invalid input", body = ValidationErrors),
        (status = 404, description = "Product not found", body = ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn update_product(
    repo: Extension<SharedRepository>,
    RawId(raw_id): RawId,
    JsonBody(body): JsonBody,
) -> Result<Json<ProductResponse>, ApiError> {
    let input = RequestInput::new()
        .with_param("id", raw_id.as_str())
        .with_body(body);
    validation::gate(UPDATE_PRODUCT, &input)?;

    let id = parse_id(&raw_id)?;
    let draft = ProductDraft::from_body(input.body())?;
    let data = repo.update(id, &draft).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(ProductResponse { data }))
}

#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "The ID of the product to update")),
    responses(
        (status = 200, description = "Availability toggled", body = ProductResponse),
        (status = 400, description = "Bad request - invalid ID", body = ValidationErrors),
        (status = 404, description = "Product not found", body = ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn update_availability(
    repo: Extension<SharedRepository>,
    RawId(raw_id): RawId,
    JsonBody(_body): JsonBody,
) -> Result<Json<ProductResponse>, ApiError> {
    let id = gate_id(&raw_id)?;
    let data = repo
        .toggle_availability(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(ProductResponse { data }))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "The ID of the product to delete")),
    responses(
        (status = 200, description = "Product deleted", body = DeletedResponse),
        (status = 400, description = "Bad request - invalid ID", body = ValidationErrors),
        (status = 404, description = "Product not found", body = ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn delete_product(
    repo: Extension<SharedRepository>,
    RawId(raw_id): RawId,
    JsonBody(_body): JsonBody,
) -> Result<Json<DeletedResponse>, ApiError> {
    let id = gate_id(&raw_id)?;
    if repo.delete(id).await? {
        Ok(Json(DeletedResponse { data: MSG_DELETED }))
    } else {
        Err(ApiError::NotFound)
    }
}
