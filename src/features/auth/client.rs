//! Client wrappers for the auth endpoints. Request bodies carry passwords and
//! one-time codes; none of these functions log their inputs.

use crate::{
    features::auth::types::{
        user_from_value, AuthGrant, LoginRequest, RegisterRequest, User, VerifyRequest,
    },
    portal::{ApiClient, AppError},
};
use secrecy::SecretString;
use serde_json::Value;
use tracing::instrument;

/// Creates an unverified account; the backend emails a one-time code.
#[instrument(skip_all)]
pub async fn register(api: &ApiClient, request: &RegisterRequest<'_>) -> Result<(), AppError> {
    api.post_json_empty("/auth/register", request).await
}

/// Confirms the one-time code and returns the issued token.
#[instrument(skip_all)]
pub async fn verify(api: &ApiClient, request: &VerifyRequest<'_>) -> Result<AuthGrant, AppError> {
    let response: Value = api.post_json("/auth/verify", request).await?;
    AuthGrant::from_value(&response)
}

#[instrument(skip_all)]
pub async fn login(api: &ApiClient, request: &LoginRequest<'_>) -> Result<AuthGrant, AppError> {
    let response: Value = api.post_json("/auth/login", request).await?;
    AuthGrant::from_value(&response)
}

/// Fetches the profile that `token` belongs to.
#[instrument(skip_all)]
pub async fn fetch_me(api: &ApiClient, token: &SecretString) -> Result<User, AppError> {
    let response: Value = api.get_json_with_token("/auth/me", token).await?;
    user_from_value(&response)
        .ok_or_else(|| AppError::Parse("Profile response is incomplete.".to_string()))
}
