//! Confirmation step for destructive actions. Nothing irreversible is sent to
//! the backend until a [`Confirm`] implementation has agreed to it.

/// Text shown before a destructive action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub text: String,
    pub confirm_label: String,
}

impl ConfirmPrompt {
    #[must_use]
    pub fn new(title: &str, text: &str, confirm_label: &str) -> Self {
        Self {
            title: title.to_string(),
            text: text.to_string(),
            confirm_label: confirm_label.to_string(),
        }
    }
}

pub trait Confirm {
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&ConfirmPrompt) -> bool,
{
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        self(prompt)
    }
}

/// Result of a mutation that required confirmation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<T> {
    Applied(T),
    Declined,
}

impl<T> Outcome<T> {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }
}
