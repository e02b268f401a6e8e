//! Domain features of the portal (auth, jobs, applications, contact) and the
//! small helpers they share. Every feature talks to the backend through
//! [`crate::portal::ApiClient`]; validation lives here so rejected input never
//! turns into a request.

pub mod applications;
pub mod auth;
pub mod confirm;
pub mod contact;
pub mod jobs;
pub mod scope;

use crate::portal::AppError;
use regex::Regex;
use std::sync::OnceLock;

pub fn valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(email))
}

/// Rejects blank input with a "<field> is required." message.
pub(crate) fn required(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        Err(AppError::Validation(format!("{field} is required.")))
    } else {
        Ok(())
    }
}
