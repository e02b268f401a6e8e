use crate::{
    features::{
        auth::SessionStore,
        confirm::{Confirm, ConfirmPrompt},
    },
    portal::{ApiClient, AppConfig},
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::{
    io::{self, BufRead, Write},
    sync::Arc,
};

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub config: AppConfig,
    pub assume_yes: bool,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(config: AppConfig, assume_yes: bool) -> Self {
        Self { config, assume_yes }
    }

    /// Restores the session from disk.
    #[must_use]
    pub fn session(&self) -> Arc<SessionStore> {
        Arc::new(SessionStore::open(self.config.session_path.clone()))
    }

    /// Restores the session and builds a client bound to it.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn connect(&self) -> Result<ApiClient> {
        ApiClient::new(&self.config, self.session()).context("Failed to create API client")
    }

    #[must_use]
    pub fn confirmer(&self) -> TerminalConfirm {
        TerminalConfirm {
            assume_yes: self.assume_yes,
        }
    }
}

/// Asks on the terminal; `--yes` answers every prompt.
pub struct TerminalConfirm {
    assume_yes: bool,
}

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        if self.assume_yes {
            return true;
        }

        let answer = read_line(&format!(
            "{} {} [{}? y/N] ",
            prompt.title, prompt.text, prompt.confirm_label
        ))
        .unwrap_or_default();

        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// Reads a secret from stdin after printing `label`.
///
/// # Errors
/// Returns an error if stdin cannot be read.
pub fn prompt_secret(label: &str) -> Result<SecretString> {
    let value = read_line(&format!("{label}: ")).context("Failed to read from stdin")?;
    Ok(SecretString::from(value.trim_end_matches(['\r', '\n']).to_string()))
}

fn read_line(prompt: &str) -> io::Result<String> {
    let mut stderr = io::stderr();
    stderr.write_all(prompt.as_bytes())?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}
