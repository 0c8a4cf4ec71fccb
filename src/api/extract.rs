use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header::CONTENT_TYPE, request::Parts},
};
use serde_json::{Map, Value};
use std::convert::Infallible;

use super::response::ApiError;

/// Request body as loose JSON.
///
/// Bodies that are empty or not declared as JSON read as `{}` so the
/// validation rules report missing fields. Declared JSON must parse and have
/// an object or array at the top level.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonBody(pub Value);

fn is_json(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().to_ascii_lowercase())
        .is_some_and(|mime| mime == "application/json" || mime.ends_with("+json"))
}

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let declared_json = is_json(&request);
        let bytes = Bytes::from_request(request, state)
            .await
            .map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;

        if !declared_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(Value::Object(Map::new())));
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(value @ (Value::Object(_) | Value::Array(_))) => Ok(Self(value)),
            Ok(_) => Err(ApiError::MalformedBody(
                "top-level JSON value must be an object or array".to_string(),
            )),
            Err(err) => Err(ApiError::MalformedBody(err.to_string())),
        }
    }
}

/// The `{id}` path segment as text, left for the `IsInt` rule to judge.
///
/// Never rejects: a segment that does not percent-decode to UTF-8 is kept in
/// its encoded form so it still reaches validation and fails there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawId(pub String);

impl<S> FromRequestParts<S> for RawId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let id = match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(id)) => id,
            Err(_) => parts
                .uri
                .path()
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .unwrap_or_default()
                .to_string(),
        };
        Ok(Self(id))
    }
}
