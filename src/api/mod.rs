use crate::{
    api::handlers::{health, products},
    product::SharedRepository,
};
use anyhow::{Context, Result, anyhow};
use axum::{
    Extension, Router,
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Method, Request, header::CONTENT_TYPE},
    middleware as axum_middleware,
    routing::{get, options},
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{Span, error, info, info_span};
use ulid::Ulid;
use url::Url;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub mod extract;
pub mod handlers;
pub mod middleware;
mod openapi;
pub mod response;

pub use middleware::TrustedOrigin;
pub use openapi::openapi;

const REQUEST_ID: &str = "x-request-id";

/// Build the API router with all documented routes registered.
#[must_use]
pub fn router() -> OpenApiRouter {
    openapi::api_router()
}

/// Assemble the served application around `repo`.
///
/// Layers run outermost first: request id, tracing span, access log, origin
/// guard, CORS headers. Swagger UI is served under `/docs` and the raw
/// document under `/docs/openapi.json`. Product routes also answer with a
/// trailing slash, undocumented. `OPTIONS /health` is added after the
/// layers so probes get the `X-App` header without CORS preflight handling.
pub fn app(repo: SharedRepository, frontend_origin: Option<HeaderValue>) -> Router {
    let allow_origin = match &frontend_origin {
        Some(origin) => AllowOrigin::exact(origin.clone()),
        None => AllowOrigin::list(Vec::<HeaderValue>::new()),
    };
    let cors = CorsLayer::new()
        .allow_headers([CONTENT_TYPE])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_origin(allow_origin);

    let (router, openapi) = router().split_for_parts();
    router
        .route(
            "/api/products/",
            get(products::get_products).post(products::create_product),
        )
        .route(
            "/api/products/{id}/",
            get(products::get_product_by_id)
                .put(products::update_product)
                .patch(products::update_availability)
                .delete(products::delete_product),
        )
        .merge(SwaggerUi::new("/docs").url("/docs/openapi.json", openapi))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static(REQUEST_ID),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    REQUEST_ID,
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(axum_middleware::from_fn(middleware::log_request))
                .layer(axum_middleware::from_fn_with_state(
                    TrustedOrigin(frontend_origin),
                    middleware::origin_guard,
                ))
                .layer(cors),
        )
        .route("/health", options(health::health))
        .layer(Extension(repo))
}

/// Start the server
/// # Errors
/// Return error if failed to bind or serve
pub async fn new(
    port: u16,
    repo: SharedRepository,
    frontend_origin: Option<HeaderValue>,
) -> Result<()> {
    let app = app(repo, frontend_origin);

    let listener = TcpListener::bind(format!("::0:{port}"))
        .await
        .with_context(|| format!("Failed to bind port {port}"))?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!("Failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Gracefully shutdown");
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID)
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}

/// Reduce a frontend URL to the `scheme://host[:port]` form browsers send in `Origin`.
/// # Errors
/// Returns an error if the URL does not parse or has no host.
pub fn frontend_origin(frontend_url: &str) -> Result<HeaderValue> {
    let parsed = Url::parse(frontend_url)
        .with_context(|| format!("Invalid frontend URL: {frontend_url}"))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| anyhow!("Frontend URL must include a valid host: {frontend_url}"))?;
    let port = parsed
        .port()
        .map_or_else(String::new, |port| format!(":{port}"));
    let origin = format!("{}://{}{}", parsed.scheme(), host, port);
    HeaderValue::from_str(&origin).context("Failed to build frontend origin header")
}
