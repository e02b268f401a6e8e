//! HTTP client for the portal backend with a fixed timeout and uniform error
//! mapping. The client reads the bearer token from the shared [`SessionStore`]
//! on every request, so a login or logout is visible to the next call without
//! rebuilding anything. Requests are never retried; a failed call is returned
//! to the caller immediately.

use super::{config::AppConfig, errors::AppError, user_agent};
use crate::features::auth::state::SessionStore;
use reqwest::{multipart::Form, Client, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Maximum number of backend message characters surfaced to the user.
const MAX_ERROR_CHARS: usize = 200;

/// Acknowledgment returned by create-style endpoints; both fields are optional
/// because the backend is free to answer with an empty body.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Ack {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// # Errors
    /// Returns `AppError::Config` if the HTTP client cannot be initialized.
    pub fn new(config: &AppConfig, session: Arc<SessionStore>) -> Result<Self, AppError> {
        let http = Client::builder()
            .user_agent(user_agent())
            .timeout(config.timeout)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            session,
        })
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Fetches JSON from `path`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.send(self.http.get(self.url(path))).await?;
        handle_json_response(response).await
    }

    /// Fetches JSON with an explicit token instead of the stored session, used
    /// right after verification before a session exists.
    pub async fn get_json_with_token<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &SecretString,
    ) -> Result<T, AppError> {
        let builder = self
            .http
            .get(self.url(path))
            .bearer_auth(token.expose_secret());
        let response = self.dispatch(builder, false).await?;
        handle_json_response(response).await
    }

    /// Posts JSON and parses a JSON response.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self.send(self.http.post(self.url(path)).json(body)).await?;
        handle_json_response(response).await
    }

    /// Posts JSON and ignores whatever the backend answers on success.
    pub async fn post_json_empty<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), AppError> {
        let response = self.send(self.http.post(self.url(path)).json(body)).await?;
        handle_empty_response(response).await
    }

    /// Patches JSON and ignores whatever the backend answers on success.
    pub async fn patch_json_empty<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), AppError> {
        let response = self.send(self.http.patch(self.url(path)).json(body)).await?;
        handle_empty_response(response).await
    }

    /// Posts JSON and reads an [`Ack`], tolerating an empty body.
    pub async fn post_json_ack<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Ack, AppError> {
        let ack: Option<Ack> = self.post_json(path, body).await?;
        Ok(ack.unwrap_or_default())
    }

    /// Posts a multipart form and parses a JSON response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, AppError> {
        let response = self
            .send(self.http.post(self.url(path)).multipart(form))
            .await?;
        handle_json_response(response).await
    }

    /// Issues a DELETE and expects a success status.
    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        let response = self.send(self.http.delete(self.url(path))).await?;
        handle_empty_response(response).await
    }

    fn url(&self, path: &str) -> String {
        build_url(&self.base_url, path)
    }

    /// Attaches the session token when one exists.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, AppError> {
        match self.session.token() {
            Some(token) => {
                let builder = builder.bearer_auth(token.expose_secret());
                self.dispatch(builder, true).await
            }
            None => self.dispatch(builder, false).await,
        }
    }

    async fn dispatch(
        &self,
        builder: RequestBuilder,
        with_session: bool,
    ) -> Result<Response, AppError> {
        let response = builder.send().await.map_err(map_request_error)?;

        if with_session && response.status() == StatusCode::UNAUTHORIZED {
            warn!("Session token rejected by the backend, clearing session");
            self.session.logout();
        }

        Ok(response)
    }
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        warn!("Request timed out: {err}");
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        error!("Failed to build request: {err}");
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else {
        error!("Unable to reach the server: {err}");
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }

    let body = response
        .bytes()
        .await
        .map_err(|err| AppError::Network(format!("Failed to read response: {err}")))?;

    // an empty body reads as `null`, which `Option<T>` targets accept
    let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &body[..]
    };

    serde_json::from_slice(body).map_err(|err| {
        error!("Failed to decode response: {err}");
        AppError::Parse(format!("Failed to decode response: {err}"))
    })
}

async fn handle_empty_response(response: Response) -> Result<(), AppError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(error_from_response(response).await)
    }
}

async fn error_from_response(response: Response) -> AppError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = backend_message(&body);

    debug!(status, has_message = message.is_some(), "Backend rejected request");

    AppError::Http { status, message }
}

/// Extracts `message` (or `error`) from a JSON error body, trimmed and truncated.
fn backend_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body.trim()).ok()?;
    let message = value
        .get("message")
        .or_else(|| value.get("error"))?
        .as_str()?
        .trim();

    if message.is_empty() {
        None
    } else {
        Some(message.chars().take(MAX_ERROR_CHARS).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{backend_message, build_url, MAX_ERROR_CHARS};

    #[test]
    fn build_url_joins_without_duplicate_slashes() {
        assert_eq!(
            build_url("http://localhost:5000/api/", "/jobs"),
            "http://localhost:5000/api/jobs"
        );
        assert_eq!(
            build_url("http://localhost:5000/api", "jobs/7"),
            "http://localhost:5000/api/jobs/7"
        );
        assert_eq!(build_url("", "/jobs"), "/jobs");
    }

    #[test]
    fn backend_message_reads_message_or_error() {
        assert_eq!(
            backend_message(r#"{"message":"Invalid credentials"}"#),
            Some("Invalid credentials".to_string())
        );
        assert_eq!(
            backend_message(r#"{"error":"Job not found"}"#),
            Some("Job not found".to_string())
        );
    }

    #[test]
    fn backend_message_ignores_non_json_and_blank() {
        assert_eq!(backend_message("<html>Bad Gateway</html>"), None);
        assert_eq!(backend_message(r#"{"message":"   "}"#), None);
        assert_eq!(backend_message(r#"{"message":42}"#), None);
        assert_eq!(backend_message(""), None);
    }

    #[test]
    fn backend_message_is_truncated() {
        let long = "x".repeat(MAX_ERROR_CHARS + 50);
        let body = format!(r#"{{"message":"{long}"}}"#);
        assert_eq!(
            backend_message(&body).map(|m| m.chars().count()),
            Some(MAX_ERROR_CHARS)
        );
    }
}
