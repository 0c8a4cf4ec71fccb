//! Request-level middleware: origin policy and access logging.

use axum::{
    body::HttpBody,
    extract::{Request, State},
    http::{HeaderValue, header::CONTENT_LENGTH, header::ORIGIN},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;
use tracing::{info, warn};

use super::response::ApiError;

/// The single browser origin allowed to call the API.
///
/// Requests without an `Origin` header (curl, server-to-server, same-origin
/// navigation) always pass.
#[derive(Debug, Clone, Default)]
pub struct TrustedOrigin(pub Option<HeaderValue>);

impl TrustedOrigin {
    #[must_use]
    pub fn allows(&self, origin: Option<&HeaderValue>) -> bool {
        match origin {
            None => true,
            Some(origin) => self.0.as_ref() == Some(origin),
        }
    }
}

pub async fn origin_guard(
    State(trusted): State<TrustedOrigin>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request.headers().get(ORIGIN);
    if trusted.allows(origin) {
        next.run(request).await
    } else {
        warn!("Rejected request from origin {:?}", origin);
        ApiError::OriginNotAllowed.into_response()
    }
}

/// Target of the access log, enabled at `INFO` whatever the verbosity.
pub const ACCESS_LOG_TARGET: &str = "access";

/// One line per request: `METHOD URI STATUS LATENCY ms - LENGTH`.
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    let latency = started.elapsed().as_secs_f64() * 1000.0;
    let length = response_length(&response).map_or_else(|| "-".to_string(), |n| n.to_string());
    info!(
        target: ACCESS_LOG_TARGET,
        "{method} {uri} {} {latency:.3} ms - {length}",
        response.status().as_u16()
    );

    response
}

fn response_length(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
        .or_else(|| response.body().size_hint().exact())
}
