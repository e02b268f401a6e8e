//! Anonymous contact form.

pub mod types;

pub use types::{ContactMessage, ContactReceipt, Subject};

use crate::{
    features::{required, valid_email},
    portal::{ApiClient, AppError},
};
use tracing::{info, instrument};

pub const SEND_FALLBACK: &str = "Failed to send message. Please try again.";
pub const SEND_SUCCESS: &str = "Your message has been sent successfully.";

impl ContactMessage {
    /// # Errors
    /// Returns `AppError::Validation` for a blank field or malformed email.
    pub fn validate(&self) -> Result<(), AppError> {
        required("First name", &self.first_name)?;
        required("Last name", &self.last_name)?;
        required("Email", &self.email)?;
        required("Message", &self.message)?;

        if valid_email(self.email.trim()) {
            Ok(())
        } else {
            Err(AppError::Validation(
                "Please enter a valid email address.".to_string(),
            ))
        }
    }
}

/// Sends a contact message.
///
/// # Errors
/// Validation errors are returned before any request.
#[instrument(skip_all, fields(subject = %message.subject))]
pub async fn send(api: &ApiClient, message: &ContactMessage) -> Result<ContactReceipt, AppError> {
    message.validate()?;
    let receipt: Option<ContactReceipt> = api.post_json("/contact", message).await?;
    let receipt = receipt.unwrap_or_default();
    info!(message_id = ?receipt.id, "Contact message sent");
    Ok(receipt)
}
