use std::time::Duration;

use portfolio_core::{DispatchStage, RelayPayload};
use portfolio_engine::{
    EmailJsRelay, RelayClient, RelayConfig, RelayFailureKind, RelaySettings, UnconfiguredRelay,
    ENV_ENDPOINT, ENV_NOTIFICATION_TEMPLATE_ID, ENV_PUBLIC_KEY, ENV_SERVICE_ID, ENV_TEMPLATE_ID,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEND_PATH: &str = "/api/v1.0/email/send";

fn config_for(server: &MockServer) -> RelayConfig {
    let endpoint = format!("{}{}", server.uri(), SEND_PATH);
    RelayConfig::from_lookup(|key| {
        let value = match key {
            ENV_SERVICE_ID => "service_portfolio",
            ENV_TEMPLATE_ID => "template_ack",
            ENV_NOTIFICATION_TEMPLATE_ID => "template_admin",
            ENV_PUBLIC_KEY => "public_key_123",
            ENV_ENDPOINT => endpoint.as_str(),
            _ => return None,
        };
        Some(value.to_string())
    })
    .expect("config")
}

fn payload() -> RelayPayload {
    RelayPayload {
        from_name: "Ada Lovelace".to_string(),
        from_email: "ada@example.com".to_string(),
        message: "Hello there".to_string(),
    }
}

#[tokio::test]
async fn dispatch_posts_emailjs_body_per_stage() {
    let server = MockServer::start().await;
    for template in ["template_ack", "template_admin"] {
        Mock::given(method("POST"))
            .and(path(SEND_PATH))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "service_id": "service_portfolio",
                "template_id": template,
                "user_id": "public_key_123",
                "template_params": {
                    "from_name": "Ada Lovelace",
                    "from_email": "ada@example.com",
                    "message": "Hello there"
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(1)
            .mount(&server)
            .await;
    }

    let relay = EmailJsRelay::new(config_for(&server), RelaySettings::default()).expect("client");
    relay
        .dispatch(DispatchStage::ApplicantAcknowledgment, &payload())
        .await
        .expect("acknowledgment delivered");
    relay
        .dispatch(DispatchStage::AdministratorNotification, &payload())
        .await
        .expect("notification delivered");
}

#[tokio::test]
async fn non_success_status_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string("The user_id parameter is required"))
        .mount(&server)
        .await;

    let relay = EmailJsRelay::new(config_for(&server), RelaySettings::default()).expect("client");
    let err = relay
        .dispatch(DispatchStage::ApplicantAcknowledgment, &payload())
        .await
        .expect_err("should fail");
    assert_eq!(err.kind, RelayFailureKind::HttpStatus(400));
    assert!(err.message.contains("user_id"));
}

#[tokio::test]
async fn slow_relay_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let settings = RelaySettings {
        connect_timeout: Duration::from_secs(1),
        request_timeout: Duration::from_millis(100),
    };
    let relay = EmailJsRelay::new(config_for(&server), settings).expect("client");
    let err = relay
        .dispatch(DispatchStage::AdministratorNotification, &payload())
        .await
        .expect_err("should time out");
    assert_eq!(err.kind, RelayFailureKind::Timeout);
}

#[tokio::test]
async fn unconfigured_relay_always_fails() {
    let err = UnconfiguredRelay
        .dispatch(DispatchStage::ApplicantAcknowledgment, &payload())
        .await
        .expect_err("should fail");
    assert_eq!(err.kind, RelayFailureKind::NotConfigured);
}
