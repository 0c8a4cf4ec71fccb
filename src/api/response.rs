//! Response envelope and the error type every handler returns.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::product::{Product, RepositoryError, validation::ValidationErrors};

pub const MSG_NOT_FOUND: &str = "Producto no encontrado";
pub const MSG_DELETED: &str = "Producto Eliminado";
pub const MSG_MALFORMED_JSON: &str = "JSON mal formado";
pub const MSG_ORIGIN_NOT_ALLOWED: &str = "conexion no permitida";
pub const MSG_INTERNAL: &str = "Error interno del servidor";

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub data: Product,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    pub data: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    #[schema(example = "Producto Eliminado")]
    pub data: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Producto no encontrado")]
    pub error: &'static str,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed validation with {} error(s)", .0.errors.len())]
    Validation(ValidationErrors),

    #[error("product not found")]
    NotFound,

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("origin not allowed")]
    OriginNotAllowed,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl ApiError {
    fn envelope(status: StatusCode, error: &'static str) -> Response {
        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            Self::NotFound => Self::envelope(StatusCode::NOT_FOUND, MSG_NOT_FOUND),
            Self::MalformedBody(detail) => {
                debug!("Rejected request body: {detail}");
                Self::envelope(StatusCode::BAD_REQUEST, MSG_MALFORMED_JSON)
            }
            Self::OriginNotAllowed => Self::envelope(StatusCode::FORBIDDEN, MSG_ORIGIN_NOT_ALLOWED),
            Self::Repository(err) => {
                error!("Database error: {err}");
                Self::envelope(StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL)
            }
        }
    }
}
