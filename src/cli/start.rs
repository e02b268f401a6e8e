use crate::cli::{
    actions::Action,
    commands,
    dispatch::{global_args, handler},
    globals::GlobalArgs,
    telemetry,
};
use anyhow::Result;

/// Start the CLI
///
/// # Errors
/// Returns an error if logging cannot be initialized or the arguments do not
/// form a valid configuration.
pub fn start() -> Result<(Action, GlobalArgs)> {
    let matches = commands::new().get_matches();

    let verbosity = matches.get_one::<u8>("verbosity").map_or(0, |&v| v);
    telemetry::init(
        telemetry::level_from_verbosity(verbosity),
        matches.get_flag("log-json"),
    )?;

    let globals = global_args(&matches)?;
    let action = handler(&matches)?;

    Ok((action, globals))
}
