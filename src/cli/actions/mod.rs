pub mod applications;
pub mod auth;
pub mod contact;
pub mod jobs;
pub mod route;

// Internal "interpreter" for `Action`.
mod run;

use crate::{cli::globals::GlobalArgs, portal::AppError};

#[derive(Debug)]
pub enum Action {
    Auth(auth::Args),
    Jobs(jobs::Args),
    Applications(applications::Args),
    Contact(contact::Args),
    Route(route::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self, globals: &GlobalArgs) -> anyhow::Result<()> {
        run::execute(self, globals).await
    }
}

/// Turns a feature error into the message shown to the user, using
/// `fallback` when the backend gave no usable message.
pub(crate) fn failed(fallback: &'static str) -> impl FnOnce(AppError) -> anyhow::Error {
    move |err| anyhow::anyhow!(err.user_message(fallback))
}
