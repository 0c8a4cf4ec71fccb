use crate::{
    cli::{
        actions::{Action, server::Args},
        commands::{ARG_PORT, cors, database},
    },
    database::ConnectPolicy,
};
use anyhow::{Context, Result};
use secrecy::SecretString;

/// # Errors
/// Returns an error if required arguments are missing or invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);

    let dsn = matches
        .get_one::<String>(database::ARG_DSN)
        .map(|dsn| SecretString::from(dsn.as_str()))
        .context("missing required argument: --dsn")?;

    let retries = matches
        .get_one::<u32>(database::ARG_CONNECT_RETRIES)
        .copied()
        .unwrap_or(5);

    let frontend_origin = matches
        .get_one::<String>(cors::ARG_FRONTEND_URL)
        .map(String::as_str)
        .map(crate::api::frontend_origin)
        .transpose()
        .context("invalid PRODUCT_API_FRONTEND_URL")?;

    Ok(Action::Server(Args {
        port,
        dsn,
        connect_policy: ConnectPolicy::with_retries(retries),
        frontend_origin,
    }))
}
