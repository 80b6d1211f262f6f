use std::sync::Arc;
use tokio::net::TcpListener;

use ilerai_application::UssdEngine;
use ilerai_core::config::UssdConfig;
use ilerai_infrastructure::{InMemoryPhcDirectory, InMemoryUssdSessionRepository};
use ilerai_server::router;

const MAIN_TEXT: &str = "Welcome to IlerAI PHC\n1. Find Nearby PHCs\n2. Check Services\n3. Drug Availability\n4. Emergency Contact";

async fn spawn_server() -> String {
    let engine = Arc::new(UssdEngine::new(
        Arc::new(InMemoryUssdSessionRepository::new()),
        Arc::new(InMemoryPhcDirectory::seeded()),
        UssdConfig::default(),
    ));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(engine)).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn post_form(client: &reqwest::Client, base: &str, session_id: &str, text: &str) -> String {
    let response = client
        .post(format!("{}/api/ussd", base))
        .form(&[
            ("sessionId", session_id),
            ("serviceCode", "*347*22#"),
            ("phoneNumber", "+2348012345678"),
            ("text", text),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    response.text().await.unwrap()
}

#[tokio::test]
async fn test_form_dialog() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    assert_eq!(
        post_form(&client, &base, "http-1", "").await,
        format!("CON {}", MAIN_TEXT)
    );
    assert!(
        post_form(&client, &base, "http-1", "3")
            .await
            .starts_with("CON Drug Stock Check:")
    );
    assert!(
        post_form(&client, &base, "http-1", "3*2")
            .await
            .starts_with("CON Amoxicillin: In Stock")
    );
}

#[tokio::test]
async fn test_json_body_and_plain_text_reply() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/ussd", base))
        .json(&serde_json::json!({
            "sessionId": "http-json",
            "serviceCode": "*347*22#",
            "phoneNumber": "+2348012345678",
            "text": ""
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(response.text().await.unwrap(), format!("CON {}", MAIN_TEXT));
}

#[tokio::test]
async fn test_missing_text_is_a_fresh_dial() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let body = client
        .post(format!("{}/api/ussd", base))
        .json(&serde_json::json!({
            "sessionId": "http-no-text",
            "phoneNumber": "+2348012345678"
        }))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, format!("CON {}", MAIN_TEXT));
}

#[tokio::test]
async fn test_emergency_ends_dialog() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    post_form(&client, &base, "http-sos", "").await;
    let body = post_form(&client, &base, "http-sos", "4").await;
    assert!(body.starts_with("END Emergency Contacts:"));
}

#[tokio::test]
async fn test_undecodable_body_gets_unavailable_line() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/ussd", base))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.text().await.unwrap(),
        "END Service temporarily unavailable. Please try again later."
    );
}

#[tokio::test]
async fn test_service_info_endpoint() {
    let base = spawn_server().await;

    let info: serde_json::Value = reqwest::get(format!("{}/api/ussd/test", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(info["success"], true);
    assert_eq!(info["message"], "USSD Service Active");
    assert_eq!(info["code"], "*347*22#");
    assert_eq!(info["features"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_health() {
    let base = spawn_server().await;
    let body = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "ok");
}
