//! Client wrappers for job endpoints. Creating and deleting jobs needs an admin
//! session; the backend enforces that.

use crate::{
    features::jobs::types::{Job, NewJob},
    portal::{api::Ack, ApiClient, AppError},
};
use serde_json::Value;
use tracing::{instrument, warn};

/// Lists jobs. Rows that do not decode, such as a job type the board does not
/// know, are skipped so the rest of the board still shows.
#[instrument(skip(api))]
pub async fn list_jobs(api: &ApiClient) -> Result<Vec<Job>, AppError> {
    let rows: Vec<Value> = api.get_json("/jobs").await?;
    Ok(decode_rows(rows))
}

fn decode_rows(rows: Vec<Value>) -> Vec<Job> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.get("id").cloned();
            serde_json::from_value::<Job>(row)
                .map_err(|err| warn!(job_id = ?id, error = %err, "Skipping job the board cannot show"))
                .ok()
        })
        .collect()
}

#[instrument(skip(api))]
pub async fn get_job(api: &ApiClient, id: u64) -> Result<Job, AppError> {
    api.get_json(&format!("/jobs/{id}")).await
}

#[instrument(skip(api, job), fields(title = %job.title))]
pub async fn create_job(api: &ApiClient, job: &NewJob) -> Result<Ack, AppError> {
    api.post_json_ack("/jobs", job).await
}

#[instrument(skip(api))]
pub async fn delete_job(api: &ApiClient, id: u64) -> Result<(), AppError> {
    api.delete(&format!("/jobs/{id}")).await
}
