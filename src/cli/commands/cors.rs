use clap::{Arg, Command};

pub const ARG_FRONTEND_URL: &str = "frontend-url";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_FRONTEND_URL)
            .long("frontend-url")
            .help("Frontend allowed to call the API from a browser")
            .long_help(
                "Frontend allowed to call the API from a browser. Only its origin (scheme, host, port) is compared against the Origin header; when unset, every request that carries an Origin header is rejected.",
            )
            .env("PRODUCT_API_FRONTEND_URL"),
    )
}
