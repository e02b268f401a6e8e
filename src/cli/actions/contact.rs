use crate::{
    cli::{actions::failed, globals::GlobalArgs},
    features::contact::{self, ContactMessage, SEND_FALLBACK, SEND_SUCCESS},
};
use anyhow::Result;

#[derive(Debug)]
pub struct Args {
    pub message: ContactMessage,
}

/// # Errors
/// Returns an error if the message is invalid or the backend rejects it.
pub async fn execute(args: Args, globals: &GlobalArgs) -> Result<()> {
    let api = globals.connect()?;
    contact::send(&api, &args.message)
        .await
        .map_err(failed(SEND_FALLBACK))?;
    println!("Message Sent! {SEND_SUCCESS}");
    Ok(())
}
