#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use manpower::{
    features::auth::{Role, SessionStore, User},
    portal::{ApiClient, AppConfig},
};
use secrecy::SecretString;
use serde_json::{json, Value};
use std::{net::TcpListener, path::PathBuf, sync::Arc, time::Duration};
use tempfile::TempDir;
use wiremock::MockServer;

pub const TOKEN: &str = "test-token";

pub fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

/// A mock backend plus a client whose session lives in a temporary directory.
pub struct Portal {
    pub server: MockServer,
    pub api: ApiClient,
    pub session_path: PathBuf,
    _dir: TempDir,
}

impl Portal {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let session_path = dir.path().join("session.json");

        let config = AppConfig {
            api_base_url: server.uri(),
            session_path: session_path.clone(),
            timeout: Duration::from_secs(5),
        };
        let store = Arc::new(SessionStore::open(session_path.clone()));
        let api = ApiClient::new(&config, store).expect("failed to build client");

        Self {
            server,
            api,
            session_path,
            _dir: dir,
        }
    }

    pub fn sign_in(&self, role: Role) -> User {
        let user = user(role);
        self.api
            .session()
            .login(SecretString::from(TOKEN.to_string()), user.clone());
        user
    }
}

pub fn user(role: Role) -> User {
    match role {
        Role::Admin => User {
            id: 1,
            username: "admin".to_string(),
            email: "admin@manpower.lk".to_string(),
            role,
            verified: true,
        },
        Role::User => User {
            id: 9,
            username: "Kasun Perera".to_string(),
            email: "kasun@example.com".to_string(),
            role,
            verified: true,
        },
    }
}

pub fn job_json(id: u64, title: &str, keywords: &[&str]) -> Value {
    json!({
        "id": id,
        "title": title,
        "type": "Full-time",
        "location": "Colombo",
        "description": "Site work",
        "salary": "LKR 50,000",
        "postedDate": "2024-05-01",
        "keywords": keywords,
    })
}

pub fn application_json(id: u64, status: &str) -> Value {
    json!({
        "id": id,
        "job_id": 4,
        "user_id": 9,
        "full_name": "Kasun Perera",
        "email": "kasun@example.com",
        "phone": "077-1234567",
        "address": "12 Temple Rd, Kandy",
        "gender": "Male",
        "age": 29,
        "cv_path": "uploads/cv-11.pdf",
        "status": status,
        "applied_at": "2024-05-02T09:30:00.000Z",
        "job_title": "Mason",
    })
}
