#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use anyhow::Result;
use common::{can_bind_localhost, Portal};
use manpower::features::auth::{
    flow::{LOGIN_FALLBACK, VERIFY_FALLBACK},
    AuthFlow, AuthState, Registration, Role,
};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use wiremock::matchers::{any, body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn registration(password: &str, confirm: &str) -> Registration {
    Registration {
        username: "Kasun Perera".to_string(),
        email: "kasun@example.com".to_string(),
        password: SecretString::from(password.to_string()),
        confirm_password: SecretString::from(confirm.to_string()),
    }
}

fn secret(value: &str) -> SecretString {
    SecretString::from(value.to_string())
}

#[tokio::test]
async fn mismatched_passwords_never_reach_backend() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let portal = Portal::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&portal.server)
        .await;

    let mut flow = AuthFlow::new(&portal.api);
    let err = flow
        .register(&registration("secret-1", "secret-2"))
        .await
        .unwrap_err();

    assert_eq!(err.user_message("Registration failed"), "Passwords don't match");
    assert_eq!(flow.state(), AuthState::Anonymous);
    Ok(())
}

#[tokio::test]
async fn register_then_verify_signs_in() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let portal = Portal::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "username": "Kasun Perera",
            "email": "kasun@example.com",
            "password": "secret-1"
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "message": "Verification code sent to your email" })),
        )
        .expect(1)
        .mount(&portal.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/verify"))
        .and(body_json(json!({ "email": "kasun@example.com", "otp": "123456" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "verified-token",
            "user": {
                "id": 9,
                "username": "Kasun Perera",
                "email": "kasun@example.com",
                "role": "user",
                "is_verified": 1
            }
        })))
        .expect(1)
        .mount(&portal.server)
        .await;

    let mut flow = AuthFlow::new(&portal.api);
    flow.register(&registration("secret-1", "secret-1")).await?;
    assert_eq!(
        flow.state(),
        AuthState::RegisteredUnverified {
            email: "kasun@example.com".to_string()
        }
    );

    let user = flow.verify(&secret("123456")).await?;
    assert_eq!(user.role, Role::User);
    assert!(user.verified);
    assert_eq!(flow.state(), AuthState::LoggedIn(user.clone()));

    let session = portal.api.session();
    assert_eq!(session.current_user(), Some(user));
    assert_eq!(
        session.token().map(|t| t.expose_secret().to_string()),
        Some("verified-token".to_string())
    );
    assert!(portal.session_path.exists());
    Ok(())
}

#[tokio::test]
async fn wrong_code_keeps_registration_pending() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let portal = Portal::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/verify"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Invalid or expired OTP" })),
        )
        .mount(&portal.server)
        .await;

    let mut flow = AuthFlow::awaiting_verification(&portal.api, "kasun@example.com");
    let err = flow.verify(&secret("000000")).await.unwrap_err();

    assert_eq!(err.user_message(VERIFY_FALLBACK), "Invalid or expired OTP");
    assert_eq!(
        flow.state(),
        AuthState::RegisteredUnverified {
            email: "kasun@example.com".to_string()
        }
    );
    assert!(!portal.api.session().is_authenticated());
    Ok(())
}

#[tokio::test]
async fn verify_without_profile_fetches_me() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let portal = Portal::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/verify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "fresh-token" })))
        .mount(&portal.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("Authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9,
            "username": "Kasun Perera",
            "email": "Kasun@Example.com",
            "role": "user"
        })))
        .expect(1)
        .mount(&portal.server)
        .await;

    let mut flow = AuthFlow::awaiting_verification(&portal.api, "kasun@example.com");
    let user = flow.verify(&secret("123456")).await?;

    assert_eq!(user.id, 9);
    assert!(portal.api.session().is_authenticated());
    Ok(())
}

#[tokio::test]
async fn verify_fails_when_profile_unavailable() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let portal = Portal::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/verify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "fresh-token" })))
        .mount(&portal.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&portal.server)
        .await;

    let mut flow = AuthFlow::awaiting_verification(&portal.api, "kasun@example.com");
    let err = flow.verify(&secret("123456")).await.unwrap_err();

    assert_eq!(err.user_message(VERIFY_FALLBACK), VERIFY_FALLBACK);
    assert!(matches!(flow.state(), AuthState::RegisteredUnverified { .. }));
    assert!(!portal.api.session().is_authenticated());
    Ok(())
}

#[tokio::test]
async fn login_failure_surfaces_backend_message() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let portal = Portal::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&portal.server)
        .await;

    let mut flow = AuthFlow::new(&portal.api);
    let err = flow
        .login("kasun@example.com", &secret("wrong"))
        .await
        .unwrap_err();

    assert_eq!(err.user_message(LOGIN_FALLBACK), "Invalid credentials");
    assert_eq!(flow.state(), AuthState::Anonymous);
    assert!(!portal.session_path.exists());
    Ok(())
}

#[tokio::test]
async fn login_failure_without_message_uses_fallback() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let portal = Portal::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&portal.server)
        .await;

    let mut flow = AuthFlow::new(&portal.api);
    let err = flow
        .login("kasun@example.com", &secret("secret-1"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(502));
    assert_eq!(err.user_message(LOGIN_FALLBACK), "Login failed");
    Ok(())
}

#[tokio::test]
async fn login_then_logout() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let portal = Portal::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "email": "admin@manpower.lk", "password": "secret-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "admin-token",
            "user": { "id": 1, "username": "admin", "email": "admin@manpower.lk", "role": "admin" }
        })))
        .mount(&portal.server)
        .await;

    let mut flow = AuthFlow::new(&portal.api);
    let user = flow.login("admin@manpower.lk", &secret("secret-1")).await?;
    assert_eq!(user.role, Role::Admin);
    assert!(portal.session_path.exists());

    flow.logout();
    assert_eq!(flow.state(), AuthState::Anonymous);
    assert_eq!(portal.api.session().current_user(), None);
    assert!(!portal.session_path.exists());
    Ok(())
}
