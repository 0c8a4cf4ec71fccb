use clap::{Arg, ArgAction, Command, builder::ValueParser};

pub const ARG_VERBOSITY: &str = "verbosity";

/// Level names in verbosity order, `error` is the quietest.
const LEVEL_NAMES: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Highest numeric verbosity accepted from the environment.
const MAX_VERBOSITY: u8 = 5;

/// Parse `PRODUCT_API_LOG_LEVEL`: a level name or a number up to 5.
#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(|level: &str| -> Result<u8, String> {
        if let Ok(verbosity) = level.parse::<u8>() {
            return if verbosity <= MAX_VERBOSITY {
                Ok(verbosity)
            } else {
                Err(format!("log level {verbosity} is above {MAX_VERBOSITY}"))
            };
        }

        let name = level.to_ascii_lowercase();
        LEVEL_NAMES
            .iter()
            .position(|known| *known == name)
            .and_then(|index| u8::try_from(index).ok())
            .ok_or_else(|| format!("unknown log level '{level}', expected one of {LEVEL_NAMES:?}"))
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Raise log verbosity, repeat for more (-v warn ... -vvvv trace)")
            .long_help(
                "Raise log verbosity. Without it only errors and the per-request access log are printed. RUST_LOG overrides the resulting filter.",
            )
            .env("PRODUCT_API_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}
