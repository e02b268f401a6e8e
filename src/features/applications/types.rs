use crate::portal::AppConfig;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    /// `pending -> reviewed`, and `pending`/`reviewed` -> `accepted`/`rejected`.
    #[must_use]
    pub fn can_transition_to(self, next: ApplicationStatus) -> bool {
        use ApplicationStatus::{Accepted, Pending, Rejected, Reviewed};

        matches!(
            (self, next),
            (Pending, Reviewed) | (Pending | Reviewed, Accepted | Rejected)
        )
    }

    /// The backend emails the applicant when an application reaches this status.
    #[must_use]
    pub fn notifies_applicant(self) -> bool {
        matches!(self, ApplicationStatus::Accepted | ApplicationStatus::Rejected)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "pending" => Ok(ApplicationStatus::Pending),
            "reviewed" => Ok(ApplicationStatus::Reviewed),
            "accepted" => Ok(ApplicationStatus::Accepted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            _ => Err(format!(
                "invalid status '{value}', expected pending, reviewed, accepted or rejected"
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(format!(
                "invalid gender '{value}', expected Male, Female or Other"
            )),
        }
    }
}

/// An application as the admin dashboard sees it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Application {
    pub id: u64,
    pub job_id: u64,
    pub user_id: u64,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "optional_age")]
    pub age: Option<u8>,
    #[serde(default)]
    pub cv_path: Option<String>,
    pub status: ApplicationStatus,
    #[serde(deserialize_with = "timestamp")]
    pub applied_at: DateTime<Utc>,
    #[serde(default)]
    pub job_title: Option<String>,
}

impl Application {
    /// Download link for the uploaded CV, served by the backend under
    /// `/uploads`. Paths already stored with the `uploads/` prefix are not
    /// prefixed twice.
    #[must_use]
    pub fn cv_url(&self, config: &AppConfig) -> Option<String> {
        let path = self
            .cv_path
            .as_deref()
            .map(|path| path.trim().trim_start_matches('/'))
            .filter(|path| !path.is_empty())?;
        let path = path.strip_prefix("uploads/").unwrap_or(path);
        Some(format!(
            "{}/uploads/{path}",
            config.api_base_url.trim_end_matches('/')
        ))
    }
}

#[derive(Serialize)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
}

/// Accepts RFC 3339 as well as the `YYYY-MM-DD HH:MM:SS` form SQL drivers emit.
fn timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S").map(|naive| naive.and_utc())
        })
        .map_err(serde::de::Error::custom)
}

/// Age arrives as a number or as the string typed into the form.
fn optional_age<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(value) => value.as_u64().and_then(|v| u8::try_from(v).ok()),
        Value::String(value) => value.trim().parse().ok(),
        _ => None,
    })
}
