use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Subject {
    #[default]
    #[serde(rename = "Request Manpower")]
    RequestManpower,
    #[serde(rename = "Job Application")]
    JobApplication,
    #[serde(rename = "General Inquiry")]
    GeneralInquiry,
}

impl Subject {
    pub const ALL: [Subject; 3] = [
        Subject::RequestManpower,
        Subject::JobApplication,
        Subject::GeneralInquiry,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Subject::RequestManpower => "Request Manpower",
            Subject::JobApplication => "Job Application",
            Subject::GeneralInquiry => "General Inquiry",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subject {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key = value.trim().replace(['-', '_'], " ").to_lowercase();
        Subject::ALL
            .into_iter()
            .find(|subject| subject.as_str().to_lowercase() == key)
            .ok_or_else(|| {
                format!(
                    "invalid subject '{value}', expected one of: {}",
                    Subject::ALL.map(Subject::as_str).join(", ")
                )
            })
    }
}

/// Body of `POST /contact`.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub subject: Subject,
    pub message: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ContactReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn subject_defaults_and_parses() {
        assert_eq!(Subject::default(), Subject::RequestManpower);
        assert_eq!("general-inquiry".parse(), Ok(Subject::GeneralInquiry));
        assert_eq!("Job Application".parse(), Ok(Subject::JobApplication));
        assert!("Complaint".parse::<Subject>().is_err());
    }

    #[test]
    fn message_uses_form_field_names() {
        let message = ContactMessage {
            first_name: "Nimal".to_string(),
            last_name: "Silva".to_string(),
            email: "nimal@example.com".to_string(),
            subject: Subject::RequestManpower,
            message: "We need ten masons.".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "firstName": "Nimal",
                "lastName": "Silva",
                "email": "nimal@example.com",
                "subject": "Request Manpower",
                "message": "We need ten masons."
            })
        );
    }
}
