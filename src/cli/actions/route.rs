use crate::{cli::globals::GlobalArgs, features::auth::GuardOutcome, routes::Route};
use anyhow::{anyhow, Result};

#[derive(Debug)]
pub struct Args {
    pub path: String,
}

/// Prints what the current session would see when opening `path`.
///
/// # Errors
/// Returns an error for an unknown path.
pub fn execute(args: &Args, globals: &GlobalArgs) -> Result<()> {
    let route = Route::parse(&args.path).ok_or_else(|| anyhow!("Page not found: {}", args.path))?;
    let session = globals.session();

    match route.visit(&session) {
        GuardOutcome::Render => println!("{}: allowed", route.path()),
        GuardOutcome::Redirect(target) => {
            println!("{}: redirected to {}", route.path(), target.path());
        }
        GuardOutcome::PromptLogin => {
            println!("{}: please log in or register to continue", route.path());
        }
        GuardOutcome::Pending => println!("{}: session not restored yet", route.path()),
    }
    Ok(())
}
