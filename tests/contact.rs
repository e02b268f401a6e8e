#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use anyhow::Result;
use common::{can_bind_localhost, Portal};
use manpower::features::contact::{self, ContactMessage, Subject, SEND_FALLBACK};
use serde_json::json;
use wiremock::matchers::{any, body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn message() -> ContactMessage {
    ContactMessage {
        first_name: "Nimal".to_string(),
        last_name: "Silva".to_string(),
        email: "nimal@example.com".to_string(),
        subject: Subject::default(),
        message: "We need ten masons for a site in Peliyagoda.".to_string(),
    }
}

#[tokio::test]
async fn send_posts_contact_form() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let portal = Portal::start().await;

    Mock::given(method("POST"))
        .and(path("/contact"))
        .and(body_json(json!({
            "firstName": "Nimal",
            "lastName": "Silva",
            "email": "nimal@example.com",
            "subject": "Request Manpower",
            "message": "We need ten masons for a site in Peliyagoda."
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "message": "Message received", "id": 3 })),
        )
        .expect(1)
        .mount(&portal.server)
        .await;

    let receipt = contact::send(&portal.api, &message()).await?;
    assert_eq!(receipt.id, Some(3));
    Ok(())
}

#[tokio::test]
async fn invalid_message_is_not_sent() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let portal = Portal::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&portal.server)
        .await;

    let mut invalid = message();
    invalid.email = "not-an-email".to_string();
    let err = contact::send(&portal.api, &invalid).await.unwrap_err();
    assert!(err.is_validation());
    Ok(())
}

#[tokio::test]
async fn backend_failure_uses_fallback() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let portal = Portal::start().await;
    Mock::given(method("POST"))
        .and(path("/contact"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&portal.server)
        .await;

    let err = contact::send(&portal.api, &message()).await.unwrap_err();
    assert_eq!(
        err.user_message(SEND_FALLBACK),
        "Failed to send message. Please try again."
    );
    Ok(())
}
