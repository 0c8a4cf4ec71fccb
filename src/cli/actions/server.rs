use crate::{
    api,
    database::{self, ConnectPolicy},
    product::{SharedRepository, postgres::PgProductRepository, schema::PRODUCTS},
};
use anyhow::{Context, Result};
use axum::http::HeaderValue;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::info;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: SecretString,
    pub connect_policy: ConnectPolicy,
    pub frontend_origin: Option<HeaderValue>,
}

/// Connect, synchronize the table, then serve until shutdown.
/// # Errors
/// Returns an error if the database stays unreachable or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    info!(
        port = args.port,
        dsn = %redact_dsn(&args.dsn),
        db_connect_retries = args.connect_policy.retries(),
        frontend_origin = ?args.frontend_origin,
        "starting {} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let pool = database::connect(&args.dsn, args.connect_policy).await?;

    let repository = PgProductRepository::new(pool, &PRODUCTS);
    repository
        .sync_schema()
        .await
        .context("Failed to synchronize the products table")?;

    let repo: SharedRepository = Arc::new(repository);

    api::new(args.port, repo, args.frontend_origin).await
}

const UNPARSEABLE_DSN: &str = "<unparseable dsn>";

/// DSN with the password replaced, for logs. Anything that cannot be
/// redacted is not printed at all.
fn redact_dsn(dsn: &SecretString) -> String {
    match Url::parse(dsn.expose_secret()) {
        Ok(mut url) => {
            if url.password().is_some() && url.set_password(Some("*****")).is_err() {
                return UNPARSEABLE_DSN.to_string();
            }
            url.to_string()
        }
        Err(_) => UNPARSEABLE_DSN.to_string(),
    }
}
