use crate::{
    features::applications::types::{Application, ApplicationStatus, StatusUpdate},
    portal::{api::Ack, ApiClient, AppError},
};
use reqwest::multipart::Form;
use tracing::instrument;

/// All applications, newest first as the backend orders them. Admin only.
#[instrument(skip(api))]
pub async fn list_applications(api: &ApiClient) -> Result<Vec<Application>, AppError> {
    api.get_json("/applications").await
}

/// The signed-in applicant's own applications.
#[instrument(skip(api))]
pub async fn list_my_applications(api: &ApiClient) -> Result<Vec<Application>, AppError> {
    api.get_json("/applications/my").await
}

#[instrument(skip(api, form))]
pub async fn submit_application(api: &ApiClient, form: Form) -> Result<Ack, AppError> {
    let ack: Option<Ack> = api.post_multipart("/applications", form).await?;
    Ok(ack.unwrap_or_default())
}

#[instrument(skip(api))]
pub async fn update_status(
    api: &ApiClient,
    id: u64,
    status: ApplicationStatus,
) -> Result<(), AppError> {
    api.patch_json_empty(&format!("/applications/{id}"), &StatusUpdate { status })
        .await
}

#[instrument(skip(api))]
pub async fn delete_application(api: &ApiClient, id: u64) -> Result<(), AppError> {
    api.delete(&format!("/applications/{id}")).await
}
