//! The job board working set. Admin mutations are confirmed by the backend
//! first and then followed by a full re-fetch; the catalog is never edited
//! locally. When the re-fetch fails the old list stays and the result says so.

use crate::{
    features::{
        auth::require_admin,
        confirm::{Confirm, ConfirmPrompt, Outcome},
        jobs::{
            client,
            types::{Job, JobType, NewJob},
        },
        required,
        scope::ViewScope,
    },
    portal::{api::Ack, ApiClient, AppError},
};
use chrono::NaiveDate;
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info, instrument, warn};

pub const POST_FALLBACK: &str = "Failed to post job.";
pub const DELETE_FALLBACK: &str = "Failed to delete job";
pub const LOAD_FALLBACK: &str = "Failed to fetch jobs.";
pub const STALE_NOTICE: &str = "The job list could not be reloaded; it may be out of date.";

/// A mutation the backend accepted. `reload_error` holds the failure of the
/// follow-up fetch, in which case the working set still shows the old list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Committed<T> {
    pub value: T,
    pub reload_error: Option<AppError>,
}

impl<T> Committed<T> {
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.reload_error.is_some()
    }
}

/// Splits a comma-separated keyword list into trimmed, non-empty, distinct
/// entries in their original order.
#[must_use]
pub fn split_keywords(raw: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for keyword in raw.split(',').map(str::trim).filter(|k| !k.is_empty()) {
        if !keywords.iter().any(|existing| existing == keyword) {
            keywords.push(keyword.to_string());
        }
    }
    keywords
}

/// Admin "post a job" form.
#[derive(Clone, Debug)]
pub struct JobDraft {
    pub title: String,
    pub location: String,
    pub job_type: JobType,
    pub salary: String,
    pub description: String,
    pub keywords: String,
}

impl JobDraft {
    /// Validates the form and stamps it with `posted_date`.
    ///
    /// # Errors
    /// Returns `AppError::Validation` when a required field is blank.
    pub fn into_new_job(self, posted_date: NaiveDate) -> Result<NewJob, AppError> {
        required("Job title", &self.title)?;
        required("Location", &self.location)?;
        required("Salary", &self.salary)?;
        required("Description", &self.description)?;

        Ok(NewJob {
            title: self.title.trim().to_string(),
            location: self.location.trim().to_string(),
            job_type: self.job_type,
            description: self.description.trim().to_string(),
            salary: self.salary.trim().to_string(),
            posted_date,
            keywords: split_keywords(&self.keywords),
        })
    }
}

/// Public board filters; empty fields match everything.
#[derive(Clone, Debug, Default)]
pub struct JobFilter {
    pub search: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
}

impl JobFilter {
    /// Search hits title or any keyword, case-insensitively; location and type
    /// must match exactly.
    #[must_use]
    pub fn matches(&self, job: &Job) -> bool {
        let matches_search = self
            .search
            .as_deref()
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .map_or(true, |term| {
                job.title.to_lowercase().contains(&term)
                    || job.keywords.iter().any(|k| k.to_lowercase().contains(&term))
            });
        let matches_location = self
            .location
            .as_deref()
            .filter(|location| !location.is_empty())
            .map_or(true, |location| job.location == location);
        let matches_type = self.job_type.map_or(true, |job_type| job.job_type == job_type);

        matches_search && matches_location && matches_type
    }

    #[must_use]
    pub fn apply<'a>(&self, jobs: &'a [Job]) -> Vec<&'a Job> {
        jobs.iter().filter(|job| self.matches(job)).collect()
    }
}

/// Distinct locations in first-seen order, for the location filter.
#[must_use]
pub fn unique_locations(jobs: &[Job]) -> Vec<String> {
    let mut locations: Vec<String> = Vec::new();
    for job in jobs {
        if !locations.contains(&job.location) {
            locations.push(job.location.clone());
        }
    }
    locations
}

/// Distinct job types in first-seen order, for the type filter.
#[must_use]
pub fn unique_types(jobs: &[Job]) -> Vec<JobType> {
    let mut types: Vec<JobType> = Vec::new();
    for job in jobs {
        if !types.contains(&job.job_type) {
            types.push(job.job_type);
        }
    }
    types
}

pub struct JobCatalog<'a> {
    api: &'a ApiClient,
    jobs: RwLock<Vec<Job>>,
    scope: ViewScope,
}

impl<'a> JobCatalog<'a> {
    #[must_use]
    pub fn new(api: &'a ApiClient, scope: ViewScope) -> Self {
        Self {
            api,
            jobs: RwLock::new(Vec::new()),
            scope,
        }
    }

    #[must_use]
    pub fn jobs(&self) -> Vec<Job> {
        self.jobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the working set with the backend's list. A result that arrives
    /// after the view closed is dropped.
    ///
    /// # Errors
    /// Returns the API error; the working set is unchanged.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<(), AppError> {
        let jobs = client::list_jobs(self.api).await?;
        if !self.scope.is_alive() {
            debug!("Job list arrived after the view closed, dropping it");
            return Ok(());
        }
        *self.jobs.write().unwrap_or_else(PoisonError::into_inner) = jobs;
        Ok(())
    }

    /// Re-fetches after a confirmed mutation. A failure here does not undo the
    /// mutation, so it is reported alongside the value instead of as an error.
    async fn commit<T>(&self, value: T) -> Committed<T> {
        let reload_error = self.refresh().await.err();
        if let Some(err) = &reload_error {
            warn!(error = %err, "Job list reload failed after a confirmed change");
        }
        Committed {
            value,
            reload_error,
        }
    }

    /// Posts a job dated `today`, then re-fetches the catalog.
    ///
    /// # Errors
    /// Returns `AppError::AuthRequired` unless an admin is signed in, and
    /// validation errors before any request. Backend errors on the post leave
    /// the catalog unchanged; a failed reload is reported in the result.
    #[instrument(skip(self, draft))]
    pub async fn create(
        &self,
        draft: JobDraft,
        today: NaiveDate,
    ) -> Result<Committed<Ack>, AppError> {
        require_admin(self.api.session())?;
        let new_job = draft.into_new_job(today)?;
        let ack = client::create_job(self.api, &new_job).await?;
        info!(job_id = ?ack.id, "Job posted");
        Ok(self.commit(ack).await)
    }

    /// Deletes a job after confirmation, then re-fetches the catalog.
    ///
    /// # Errors
    /// Returns `AppError::AuthRequired` unless an admin is signed in. Backend
    /// errors on the delete leave the catalog unchanged.
    #[instrument(skip(self, confirm))]
    pub async fn delete(
        &self,
        id: u64,
        confirm: &dyn Confirm,
    ) -> Result<Outcome<Committed<()>>, AppError> {
        require_admin(self.api.session())?;
        let prompt = ConfirmPrompt::new(
            "Are you sure?",
            "You won't be able to revert this!",
            "Yes, delete it!",
        );
        if !confirm.confirm(&prompt) {
            return Ok(Outcome::Declined);
        }

        client::delete_job(self.api, id).await?;
        info!(job_id = id, "Job deleted");
        Ok(Outcome::Applied(self.commit(()).await))
    }
}
