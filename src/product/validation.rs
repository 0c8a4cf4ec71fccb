//! Declarative request validation.
//!
//! A rule set is a static slice of [`Rule`]s. [`validate`] evaluates every rule
//! against a [`RequestInput`] and returns one [`FieldError`] per failing rule,
//! in declaration order. Nothing here performs I/O; handlers call [`gate`]
//! before touching the repository.
//!
//! Values are checked through their text form the way form validators usually
//! do: a missing field or `null` reads as `""`, numbers and booleans read as
//! their literal, and arrays or objects read as `""` because they are never a
//! valid scalar.

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::{borrow::Cow, sync::LazyLock};
use utoipa::ToSchema;

pub const MSG_INVALID_ID: &str = "Id no válido";
pub const MSG_EMPTY: &str = "No puede ir vacio";
pub const MSG_INVALID_VALUE: &str = "Valor no valido";
pub const MSG_NOT_POSITIVE: &str = "Tiene que ser mayor a 0";
pub const MSG_TOO_LONG: &str = "No puede superar los 100 caracteres";

/// Maximum product name length, matching the `VARCHAR(100)` column.
pub const NAME_MAX_CHARS: usize = 100;

/// `id` path parameter of every single-product route.
pub const PRODUCT_ID: &[Rule] = &[Rule::param("id", Check::IsInt, MSG_INVALID_ID)];

/// Body of `POST /api/products`.
pub const CREATE_PRODUCT: &[Rule] = &[
    Rule::body("name", Check::NotEmpty, MSG_EMPTY),
    Rule::body("name", Check::MaxChars(NAME_MAX_CHARS), MSG_TOO_LONG),
    Rule::body("price", Check::IsNumeric, MSG_INVALID_VALUE),
    Rule::body("price", Check::NotEmpty, MSG_EMPTY),
    Rule::body("price", Check::Custom(is_positive), MSG_NOT_POSITIVE),
    Rule::body("availability", Check::IsBoolean, MSG_INVALID_VALUE).optional(),
];

/// Path and body of `PUT /api/products/{id}`.
pub const UPDATE_PRODUCT: &[Rule] = &[
    Rule::param("id", Check::IsInt, MSG_INVALID_ID),
    Rule::body("name", Check::NotEmpty, MSG_EMPTY),
    Rule::body("name", Check::MaxChars(NAME_MAX_CHARS), MSG_TOO_LONG),
    Rule::body("price", Check::IsNumeric, MSG_INVALID_VALUE),
    Rule::body("price", Check::NotEmpty, MSG_EMPTY),
    Rule::body("price", Check::Custom(is_positive), MSG_NOT_POSITIVE),
    Rule::body("availability", Check::IsBoolean, MSG_INVALID_VALUE),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Params,
    Body,
}

#[derive(Debug, Clone, Copy)]
pub enum Check {
    /// Integer literal: optional sign, no leading zeros.
    IsInt,
    /// Decimal literal: `[+-]?(\d*\.)?\d+`.
    IsNumeric,
    NotEmpty,
    /// `true`, `false`, `"true"`, `"false"`, `"1"` or `"0"`.
    IsBoolean,
    MaxChars(usize),
    /// Predicate over the raw value, `None` when the field is absent.
    Custom(fn(Option<&Value>) -> bool),
}

impl Check {
    fn passes(self, value: Option<&Value>) -> bool {
        let text = text_form(value);
        match self {
            Self::IsInt => is_int(&text),
            Self::IsNumeric => is_numeric(&text),
            Self::NotEmpty => !text.is_empty(),
            Self::IsBoolean => matches!(text.as_ref(), "true" | "false" | "1" | "0"),
            Self::MaxChars(max) => text.chars().count() <= max,
            Self::Custom(predicate) => predicate(value),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    location: Location,
    field: &'static str,
    check: Check,
    message: &'static str,
    optional: bool,
}

impl Rule {
    #[must_use]
    pub const fn param(field: &'static str, check: Check, message: &'static str) -> Self {
        Self::new(Location::Params, field, check, message)
    }

    #[must_use]
    pub const fn body(field: &'static str, check: Check, message: &'static str) -> Self {
        Self::new(Location::Body, field, check, message)
    }

    const fn new(
        location: Location,
        field: &'static str,
        check: Check,
        message: &'static str,
    ) -> Self {
        Self {
            location,
            field,
            check,
            message,
            optional: false,
        }
    }

    /// Skip the rule when the field is absent or `null`.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// One failed rule, serialized as `{type, value, msg, path, location}`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    #[serde(rename = "type")]
    #[schema(example = "field")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub value: Option<Value>,
    #[schema(example = "Valor no valido")]
    pub msg: &'static str,
    #[schema(example = "price")]
    pub path: &'static str,
    pub location: Location,
}

impl FieldError {
    fn new(rule: &Rule, value: Option<&Value>) -> Self {
        Self {
            kind: "field",
            value: value.cloned(),
            msg: rule.message,
            path: rule.field,
            location: rule.location,
        }
    }
}

/// The `400` body produced by the gate.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

/// Path parameters and JSON body of one request.
#[derive(Debug, Default, Clone)]
pub struct RequestInput {
    params: Map<String, Value>,
    body: Value,
}

impl RequestInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.params
            .insert(name.to_string(), Value::String(value.into()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    #[must_use]
    pub fn body(&self) -> &Value {
        &self.body
    }

    fn get(&self, location: Location, field: &str) -> Option<&Value> {
        match location {
            Location::Params => self.params.get(field),
            Location::Body => self.body.get(field),
        }
    }
}

/// Evaluate `rules` against `input`, returning every failure in rule order.
#[must_use]
pub fn validate(rules: &[Rule], input: &RequestInput) -> Vec<FieldError> {
    rules
        .iter()
        .filter_map(|rule| {
            let value = input.get(rule.location, rule.field);
            if rule.optional && matches!(value, None | Some(Value::Null)) {
                return None;
            }
            (!rule.check.passes(value)).then(|| FieldError::new(rule, value))
        })
        .collect()
}

/// Short-circuit with the collected errors when any rule fails.
///
/// # Errors
/// Returns [`ValidationErrors`] holding every failed rule.
pub fn gate(rules: &[Rule], input: &RequestInput) -> Result<(), ValidationErrors> {
    let errors = validate(rules, input);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { errors })
    }
}

/// Coerce a raw value to a number the way a loose `value > 0` comparison does.
#[must_use]
pub fn loose_number(value: Option<&Value>) -> Option<f64> {
    match value {
        None => None,
        Some(Value::Null) => Some(0.0),
        Some(Value::Bool(flag)) => Some(if *flag { 1.0 } else { 0.0 }),
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        Some(Value::Array(_) | Value::Object(_)) => None,
    }
}

fn is_positive(value: Option<&Value>) -> bool {
    loose_number(value).is_some_and(|number| number > 0.0)
}

/// Text form of a field, see the module docs.
#[must_use]
pub fn text_form(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        Some(Value::String(text)) => Cow::Borrowed(text.as_str()),
        Some(Value::Number(number)) => Cow::Owned(number.to_string()),
        Some(Value::Bool(flag)) => Cow::Borrowed(if *flag { "true" } else { "false" }),
        None | Some(Value::Null | Value::Array(_) | Value::Object(_)) => Cow::Borrowed(""),
    }
}

// Compiled once; `None` only if a pattern fails to compile.
static INT_LITERAL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[-+]?(?:0|[1-9][0-9]*)$").ok());
static NUMERIC_LITERAL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").ok());

fn is_int(text: &str) -> bool {
    INT_LITERAL.as_ref().is_some_and(|re| re.is_match(text))
}

fn is_numeric(text: &str) -> bool {
    NUMERIC_LITERAL.as_ref().is_some_and(|re| re.is_match(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> RequestInput {
        RequestInput::new().with_body(value)
    }

    fn messages(errors: &[FieldError]) -> Vec<&'static str> {
        errors.iter().map(|error| error.msg).collect()
    }

    #[test]
    fn create_with_empty_body_fails_four_rules() {
        let errors = validate(CREATE_PRODUCT, &body(json!({})));
        assert_eq!(
            messages(&errors),
            vec![MSG_EMPTY, MSG_INVALID_VALUE, MSG_EMPTY, MSG_NOT_POSITIVE]
        );
        assert_eq!(errors[0].path, "name");
        assert!(errors[1..].iter().all(|error| error.path == "price"));
    }

    #[test]
    fn create_with_zero_price_fails_positivity_only() {
        let errors = validate(
            CREATE_PRODUCT,
            &body(json!({ "name": "Monitor - Testing", "price": 0 })),
        );
        assert_eq!(messages(&errors), vec![MSG_NOT_POSITIVE]);
        assert_eq!(errors[0].value, Some(json!(0)));
    }

    #[test]
    fn create_with_text_price_fails_numeric_and_positivity() {
        let errors = validate(
            CREATE_PRODUCT,
            &body(json!({ "name": "Monitor - Testing", "price": "hola" })),
        );
        assert_eq!(messages(&errors), vec![MSG_INVALID_VALUE, MSG_NOT_POSITIVE]);
    }

    #[test]
    fn create_accepts_numeric_strings() {
        let errors = validate(
            CREATE_PRODUCT,
            &body(json!({ "name": "Teclado", "price": "49.90" })),
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn create_checks_availability_only_when_present() {
        let input = body(json!({ "name": "Teclado", "price": 10, "availability": "maybe" }));
        assert_eq!(messages(&validate(CREATE_PRODUCT, &input)), vec![MSG_INVALID_VALUE]);

        let input = body(json!({ "name": "Teclado", "price": 10, "availability": null }));
        assert!(validate(CREATE_PRODUCT, &input).is_empty());
    }

    #[test]
    fn update_with_empty_body_fails_five_rules() {
        let input = RequestInput::new()
            .with_param("id", "1")
            .with_body(json!({}));
        let errors = validate(UPDATE_PRODUCT, &input);
        assert_eq!(errors.len(), 5);
        assert_eq!(errors[4].path, "availability");
        assert_eq!(errors[4].location, Location::Body);
    }

    #[test]
    fn update_reports_invalid_id_alone_for_valid_body() {
        let input = RequestInput::new()
            .with_param("id", "not-valid-id")
            .with_body(json!({ "name": "Producto 1", "price": 300, "availability": true }));
        let errors = validate(UPDATE_PRODUCT, &input);
        assert_eq!(messages(&errors), vec![MSG_INVALID_ID]);
        assert_eq!(errors[0].location, Location::Params);
        assert_eq!(errors[0].value, Some(json!("not-valid-id")));
    }

    #[test]
    fn long_names_are_rejected() {
        let name = "x".repeat(NAME_MAX_CHARS + 1);
        let errors = validate(CREATE_PRODUCT, &body(json!({ "name": name, "price": 1 })));
        assert_eq!(messages(&errors), vec![MSG_TOO_LONG]);
    }

    #[test]
    fn gate_passes_clean_input() {
        let input = RequestInput::new().with_param("id", "42");
        assert!(gate(PRODUCT_ID, &input).is_ok());

        let input = RequestInput::new().with_param("id", "4.2");
        let err = gate(PRODUCT_ID, &input).err();
        assert_eq!(err.map(|e| e.errors.len()), Some(1));
    }

    #[test]
    fn literal_patterns_compile() {
        assert!(INT_LITERAL.is_some());
        assert!(NUMERIC_LITERAL.is_some());
    }

    #[test]
    fn integer_literals() {
        for ok in ["0", "7", "-12", "+3", "2000"] {
            assert!(is_int(ok), "{ok} should be an integer");
        }
        for bad in ["", "-", "01", "1.0", "1e3", "abc", " 1"] {
            assert!(!is_int(bad), "{bad} should not be an integer");
        }
    }

    #[test]
    fn numeric_literals() {
        for ok in ["0", "50", "-1", "3.14", ".5", "+2.0"] {
            assert!(is_numeric(ok), "{ok} should be numeric");
        }
        for bad in ["", "hola", "1.", "1.2.3", "1e5", "NaN", "true"] {
            assert!(!is_numeric(bad), "{bad} should not be numeric");
        }
    }

    #[test]
    fn loose_number_coercion() {
        assert_eq!(loose_number(None), None);
        assert_eq!(loose_number(Some(&json!(null))), Some(0.0));
        assert_eq!(loose_number(Some(&json!(true))), Some(1.0));
        assert_eq!(loose_number(Some(&json!(" 12 "))), Some(12.0));
        assert_eq!(loose_number(Some(&json!(""))), Some(0.0));
        assert_eq!(loose_number(Some(&json!("hola"))), None);
        assert_eq!(loose_number(Some(&json!([1]))), None);
    }

    #[test]
    fn field_error_serializes_like_a_form_validator() -> serde_json::Result<()> {
        let errors = validate(PRODUCT_ID, &RequestInput::new().with_param("id", "x"));
        let value = serde_json::to_value(&errors)?;
        assert_eq!(
            value,
            json!([{
                "type": "field",
                "value": "x",
                "msg": MSG_INVALID_ID,
                "path": "id",
                "location": "params"
            }])
        );
        Ok(())
    }
}
