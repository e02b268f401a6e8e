//! The job application form. Everything here is checked locally before the
//! multipart request is built; a rejected form never reaches the network and
//! stays intact so the applicant can fix it.

use crate::{
    features::{
        applications::{client, types::Gender},
        auth::{require_session, User},
        required, valid_email,
    },
    portal::{api::Ack, ApiClient, AppError},
};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use tracing::{info, instrument};

pub const CV_REQUIRED: &str = "Please upload your CV (PDF or Word document).";
pub const SUBMIT_FALLBACK: &str = "Failed to submit application.";
pub const SUBMIT_SUCCESS: &str = "Application submitted successfully!";

pub const MIN_AGE: u8 = 18;
pub const MAX_AGE: u8 = 100;

/// An attached CV: the original file name plus its bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CvFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl CvFile {
    /// Reads a CV from disk.
    ///
    /// # Errors
    /// Returns `AppError::Validation` for unsupported extensions and
    /// `AppError::Storage` when the file cannot be read.
    pub async fn read(path: &Path) -> Result<Self, AppError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation(CV_REQUIRED.to_string()))?;

        if content_type(&file_name).is_none() {
            return Err(AppError::Validation(CV_REQUIRED.to_string()));
        }

        let bytes = tokio::fs::read(path).await.map_err(|err| {
            AppError::Storage(format!("Failed to read {}: {err}", path.display()))
        })?;

        Ok(Self { file_name, bytes })
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&'static str> {
        content_type(&self.file_name)
    }
}

fn content_type(file_name: &str) -> Option<&'static str> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())?
        .to_lowercase();

    match extension.as_str() {
        "pdf" => Some("application/pdf"),
        "doc" => Some("application/msword"),
        "docx" => Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        _ => None,
    }
}

#[derive(Clone, Debug)]
pub struct ApplicationForm {
    pub job_id: u64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub gender: Gender,
    /// Kept as typed so an invalid value can be reported instead of lost.
    pub age: String,
    pub cv: Option<CvFile>,
}

impl ApplicationForm {
    /// An empty form for `job_id` with name and email taken from the
    /// signed-in user.
    #[must_use]
    pub fn for_user(job_id: u64, user: &User) -> Self {
        Self {
            job_id,
            full_name: user.username.clone(),
            email: user.email.clone(),
            phone: String::new(),
            address: String::new(),
            gender: Gender::default(),
            age: String::new(),
            cv: None,
        }
    }

    /// Checks the attachment first, then required fields, then the age range.
    /// Returns the parsed age.
    ///
    /// # Errors
    /// Returns `AppError::Validation` with the message to show the applicant.
    pub fn validate(&self) -> Result<u8, AppError> {
        match &self.cv {
            Some(cv) if cv.content_type().is_some() && !cv.bytes.is_empty() => {}
            _ => return Err(AppError::Validation(CV_REQUIRED.to_string())),
        }

        required("Full name", &self.full_name)?;
        required("Email", &self.email)?;
        required("Phone", &self.phone)?;
        required("Address", &self.address)?;
        required("Age", &self.age)?;

        if !valid_email(self.email.trim()) {
            return Err(AppError::Validation(
                "Please enter a valid email address.".to_string(),
            ));
        }

        parse_age(&self.age)
    }

    fn to_multipart(&self, age: u8) -> Result<Form, AppError> {
        let cv = self
            .cv
            .as_ref()
            .ok_or_else(|| AppError::Validation(CV_REQUIRED.to_string()))?;
        let mime = cv
            .content_type()
            .ok_or_else(|| AppError::Validation(CV_REQUIRED.to_string()))?;

        let part = Part::bytes(cv.bytes.clone())
            .file_name(cv.file_name.clone())
            .mime_str(mime)
            .map_err(|err| AppError::Serialization(format!("Invalid CV content type: {err}")))?;

        Ok(Form::new()
            .text("job_id", self.job_id.to_string())
            .text("full_name", self.full_name.trim().to_string())
            .text("email", self.email.trim().to_string())
            .text("phone", self.phone.trim().to_string())
            .text("address", self.address.trim().to_string())
            .text("gender", self.gender.as_str())
            .text("age", age.to_string())
            .part("cv", part))
    }
}

fn parse_age(raw: &str) -> Result<u8, AppError> {
    let out_of_range =
        || AppError::Validation(format!("Age must be between {MIN_AGE} and {MAX_AGE}."));

    let age: i64 = raw.trim().parse().map_err(|_| out_of_range())?;
    u8::try_from(age)
        .ok()
        .filter(|age| (MIN_AGE..=MAX_AGE).contains(age))
        .ok_or_else(out_of_range)
}

/// Submits `form` for the signed-in applicant. `on_success` runs once, after
/// the backend accepted the application (the job details view closes itself
/// there).
///
/// # Errors
/// Returns `AppError::AuthRequired` without a session, `AppError::Validation`
/// for a rejected form, and the backend error otherwise. The form is never
/// consumed so it can be corrected and resubmitted.
#[instrument(skip_all, fields(job_id = form.job_id))]
pub async fn submit<F>(
    api: &ApiClient,
    form: &ApplicationForm,
    on_success: Option<F>,
) -> Result<Ack, AppError>
where
    F: FnOnce(&Ack),
{
    require_session(api.session())?;
    let age = form.validate()?;
    let multipart = form.to_multipart(age)?;

    let ack = client::submit_application(api, multipart).await?;
    info!(application_id = ?ack.id, "Application submitted");

    if let Some(callback) = on_success {
        callback(&ack);
    }
    Ok(ack)
}
