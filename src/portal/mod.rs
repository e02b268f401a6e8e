//! Shared client plumbing: the HTTP API client, configuration, the error type and
//! build metadata. Feature modules go through [`ApiClient`] so every request
//! gets the same timeout, user agent and bearer-token policy.
//!
//! ## Backend contract
//!
//! All paths are relative to the configured API base URL
//! (`http://localhost:5000/api` by default). Error bodies are JSON objects with
//! an optional `message` field; when present it is surfaced to the user verbatim.
//! A `401` on a request that carried a token means the session is no longer
//! valid and the local session is cleared.
//!
//! These helpers never log request bodies; callers must still avoid logging
//! passwords, one-time codes and tokens.

pub mod api;
#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}
pub mod config;
pub mod errors;

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub use api::ApiClient;
pub use config::{AppConfig, ConfigOverrides};
pub use errors::AppError;

/// Version string with the short commit hash.
#[must_use]
pub fn long_version() -> String {
    let short_hash = GIT_COMMIT_HASH.get(..7).unwrap_or(GIT_COMMIT_HASH);
    format!("{} ({short_hash})", env!("CARGO_PKG_VERSION"))
}

/// `User-Agent` sent with every request, e.g. `manpower/0.1.0 (1a2b3c4)`.
#[must_use]
pub fn user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), long_version())
}

#[cfg(test)]
mod tests {
    use super::{long_version, user_agent};

    #[test]
    fn user_agent_carries_version() {
        assert!(long_version().starts_with(env!("CARGO_PKG_VERSION")));
        assert!(user_agent().starts_with(concat!("manpower/", env!("CARGO_PKG_VERSION"))));
    }
}
