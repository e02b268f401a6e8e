use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Temporary,
    #[serde(rename = "Daily Wage")]
    DailyWage,
}

impl JobType {
    pub const ALL: [JobType; 5] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Contract,
        JobType::Temporary,
        JobType::DailyWage,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Temporary => "Temporary",
            JobType::DailyWage => "Daily Wage",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = String;

    /// Case-insensitive; spaces, dashes and underscores are interchangeable.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key: String = value
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();

        JobType::ALL
            .into_iter()
            .find(|job_type| job_type.as_str().replace([' ', '-'], "").to_lowercase() == key)
            .ok_or_else(|| {
                format!(
                    "invalid job type '{value}', expected one of: {}",
                    JobType::ALL.map(JobType::as_str).join(", ")
                )
            })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: u64,
    pub title: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub salary: String,
    #[serde(alias = "posted_date", deserialize_with = "posted_date")]
    pub posted_date: NaiveDate,
    #[serde(default, deserialize_with = "keyword_list")]
    pub keywords: Vec<String>,
}

/// Body of `POST /jobs`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub description: String,
    pub salary: String,
    pub posted_date: NaiveDate,
    pub keywords: Vec<String>,
}

/// Accepts `2024-05-01` as well as a full timestamp such as
/// `2024-05-01T00:00:00.000Z`.
fn posted_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let date = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(serde::de::Error::custom)
}

/// Keywords arrive as a JSON array, or as a string holding either a JSON
/// array or a comma-separated list.
fn keyword_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect()),
        Value::String(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(list) => Ok(list),
            Err(_) => Ok(super::catalog::split_keywords(&raw)),
        },
        other => Err(serde::de::Error::custom(format!(
            "expected keyword list, got {other}"
        ))),
    }
}
