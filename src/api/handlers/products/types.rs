use serde::Deserialize;
use utoipa::ToSchema;

// Documentation only: handlers validate the raw JSON body so that every rule
// can report on malformed values instead of failing deserialization.

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    #[schema(example = "Monitor curvo 49 pulgadas", max_length = 100)]
    pub name: String,
    #[schema(example = 399, exclusive_minimum = 0)]
    pub price: f64,
    /// Defaults to `true`.
    #[schema(example = true)]
    pub availability: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    #[schema(example = "Monitor curvo 49 pulgadas", max_length = 100)]
    pub name: String,
    #[schema(example = 399, exclusive_minimum = 0)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: bool,
}
