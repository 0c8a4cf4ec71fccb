//! Product records, their table definition, storage, and request validation.
//!
//! Handlers never see SQL: they validate input with [`validation`], build a
//! [`ProductDraft`], and call a [`ProductRepository`]. The repository receives
//! the table layout from [`schema`] when it is constructed.

pub mod memory;
pub mod postgres;
pub mod repository;
pub mod schema;
pub mod validation;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

pub use self::repository::{ProductRepository, RepositoryError, SharedRepository};
use self::validation::{FieldError, Location, MSG_INVALID_VALUE, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// The product ID
    #[schema(example = 1)]
    pub id: i64,
    /// The product name
    #[schema(example = "Monitor curvo 49 pulgadas")]
    pub name: String,
    /// The product price
    #[schema(example = 300)]
    pub price: f64,
    /// The product availability
    #[schema(example = true)]
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable fields of a product, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
    pub availability: bool,
}

impl ProductDraft {
    /// Build a draft from a body that passed `CREATE_PRODUCT` or `UPDATE_PRODUCT`.
    /// A missing or `null` availability defaults to `true`.
    ///
    /// # Errors
    /// Returns [`ValidationErrors`] when a field cannot be converted, which only
    /// happens if the body skipped validation or the price overflows.
    pub fn from_body(body: &Value) -> Result<Self, ValidationErrors> {
        let name = validation::text_form(body.get("name")).into_owned();

        let price = validation::text_form(body.get("price"))
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite() && *price > 0.0)
            .ok_or_else(|| invalid("price", body.get("price")))?;

        let availability = match body.get("availability") {
            None | Some(Value::Null) => true,
            Some(value) => match validation::text_form(Some(value)).as_ref() {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => return Err(invalid("availability", Some(value))),
            },
        };

        Ok(Self {
            name,
            price,
            availability,
        })
    }
}

fn invalid(field: &'static str, value: Option<&Value>) -> ValidationErrors {
    ValidationErrors {
        errors: vec![FieldError {
            kind: "field",
            value: value.cloned(),
            msg: MSG_INVALID_VALUE,
            path: field,
            location: Location::Body,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn draft_defaults_availability() -> Result<(), ValidationErrors> {
        let draft = ProductDraft::from_body(&json!({ "name": "Mouse - Testing", "price": 50 }))?;
        assert_eq!(
            draft,
            ProductDraft {
                name: "Mouse - Testing".to_string(),
                price: 50.0,
                availability: true,
            }
        );
        Ok(())
    }

    #[test]
    fn draft_reads_loose_booleans_and_numeric_strings() -> Result<(), ValidationErrors> {
        let draft = ProductDraft::from_body(
            &json!({ "name": "Silla", "price": "120.5", "availability": "0" }),
        )?;
        assert!((draft.price - 120.5).abs() < f64::EPSILON);
        assert!(!draft.availability);
        Ok(())
    }

    #[test]
    fn draft_rejects_overflowing_price() {
        let huge = format!("{}1", "9".repeat(400));
        let result = ProductDraft::from_body(&json!({ "name": "Nave", "price": huge }));
        assert_eq!(result.map_err(|e| e.errors[0].path), Err("price"));
    }

    #[test]
    fn product_serializes_camel_case() -> serde_json::Result<()> {
        let now = Utc::now();
        let product = Product {
            id: 3,
            name: "Monitor".to_string(),
            price: 300.0,
            availability: true,
            created_at: now,
            updated_at: now,
        };
        let value = serde_json::to_value(&product)?;
        assert_eq!(value["id"], json!(3));
        assert_eq!(value["availability"], json!(true));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        Ok(())
    }
}
