use crate::cli::{
    actions::{applications, auth, contact, jobs, route, Action},
    globals::GlobalArgs,
};
use anyhow::Result;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action, globals: &GlobalArgs) -> Result<()> {
    match action {
        Action::Auth(args) => auth::execute(args, globals).await,
        Action::Jobs(args) => jobs::execute(args, globals).await,
        Action::Applications(args) => applications::execute(args, globals).await,
        Action::Contact(args) => contact::execute(args, globals).await,
        Action::Route(args) => route::execute(&args, globals),
    }
}
