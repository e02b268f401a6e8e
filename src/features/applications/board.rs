//! Admin application dashboard. The local list only changes after the backend
//! confirmed a status change or deletion; a failed call leaves it untouched.

use crate::{
    features::{
        applications::{
            client,
            types::{Application, ApplicationStatus},
        },
        auth::require_admin,
        confirm::{Confirm, ConfirmPrompt, Outcome},
        scope::ViewScope,
    },
    portal::{ApiClient, AppError},
};
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info, instrument};

pub const LOAD_FALLBACK: &str = "Failed to fetch applications.";
pub const STATUS_FALLBACK: &str = "Failed to update status.";
pub const DELETE_FALLBACK: &str = "Failed to delete application.";

pub struct ApplicationBoard<'a> {
    api: &'a ApiClient,
    applications: RwLock<Vec<Application>>,
    scope: ViewScope,
}

impl<'a> ApplicationBoard<'a> {
    #[must_use]
    pub fn new(api: &'a ApiClient, scope: ViewScope) -> Self {
        Self {
            api,
            applications: RwLock::new(Vec::new()),
            scope,
        }
    }

    #[must_use]
    pub fn applications(&self) -> Vec<Application> {
        self.applications
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<Application> {
        self.applications
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|application| application.id == id)
            .cloned()
    }

    /// Loads every application. Needs an admin session.
    ///
    /// # Errors
    /// Returns `AppError::AuthRequired` for non-admins before any request, or
    /// the API error with the working set unchanged.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<(), AppError> {
        require_admin(self.api.session())?;
        let applications = client::list_applications(self.api).await?;
        if !self.scope.is_alive() {
            debug!("Application list arrived after the view closed, dropping it");
            return Ok(());
        }
        *self
            .applications
            .write()
            .unwrap_or_else(PoisonError::into_inner) = applications;
        Ok(())
    }

    /// Moves an application to `next`. Rejecting asks for confirmation first
    /// since the applicant is notified.
    ///
    /// # Errors
    /// Returns `AppError::AuthRequired` unless an admin is signed in,
    /// `AppError::Validation` for an unknown id or a transition the workflow
    /// does not allow, and the API error otherwise. The local entry keeps its
    /// old status on any error.
    #[instrument(skip(self, confirm))]
    pub async fn set_status(
        &self,
        id: u64,
        next: ApplicationStatus,
        confirm: &dyn Confirm,
    ) -> Result<Outcome<Application>, AppError> {
        require_admin(self.api.session())?;
        let current = self.get(id).ok_or_else(|| {
            AppError::Validation(format!(
                "Application {id} is not in the current list. Refresh and try again."
            ))
        })?;

        if !current.status.can_transition_to(next) {
            return Err(AppError::Validation(format!(
                "Cannot change status from {} to {next}.",
                current.status
            )));
        }

        if next == ApplicationStatus::Rejected {
            let prompt = ConfirmPrompt::new(
                "Reject this application?",
                "The applicant will be notified by email.",
                "Yes, reject",
            );
            if !confirm.confirm(&prompt) {
                return Ok(Outcome::Declined);
            }
        }

        client::update_status(self.api, id, next).await?;
        info!(
            application_id = id,
            status = %next,
            notified = next.notifies_applicant(),
            "Application status updated"
        );

        let mut updated = current;
        updated.status = next;
        if self.scope.is_alive() {
            let mut applications = self
                .applications
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(entry) = applications.iter_mut().find(|a| a.id == id) {
                entry.status = next;
            }
        }
        Ok(Outcome::Applied(updated))
    }

    /// Deletes an application after confirmation.
    ///
    /// # Errors
    /// Returns `AppError::AuthRequired` for non-admins, or the API error with
    /// the entry still in the list.
    #[instrument(skip(self, confirm))]
    pub async fn delete(&self, id: u64, confirm: &dyn Confirm) -> Result<Outcome<()>, AppError> {
        require_admin(self.api.session())?;
        let prompt = ConfirmPrompt::new(
            "Are you sure?",
            "You won't be able to revert this!",
            "Yes, delete it!",
        );
        if !confirm.confirm(&prompt) {
            return Ok(Outcome::Declined);
        }

        client::delete_application(self.api, id).await?;
        info!(application_id = id, "Application deleted");

        if self.scope.is_alive() {
            self.applications
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|application| application.id != id);
        }
        Ok(Outcome::Applied(()))
    }
}
