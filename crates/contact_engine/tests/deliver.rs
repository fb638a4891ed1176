use std::time::Duration;

use contact_core::DeliveryRequest;
use contact_engine::{
    Deliverer, DeliverySettings, EmailJsDeliverer, FailureKind, SettingsError,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> DeliverySettings {
    DeliverySettings {
        endpoint: format!("{}/api/v1.0/email/send", server.uri()),
        service_id: "service_test".to_string(),
        template_id: "template_test".to_string(),
        public_key: "public_test".to_string(),
        ..DeliverySettings::default()
    }
}

fn request() -> DeliveryRequest {
    DeliveryRequest {
        from_name: "Jo".to_string(),
        from_email: "jo@x.com".to_string(),
        subject: "Hi".to_string(),
        message: "Hello there".to_string(),
    }
}

#[tokio::test]
async fn posts_template_params_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1.0/email/send"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "service_id": "service_test",
            "template_id": "template_test",
            "user_id": "public_test",
            "template_params": {
                "from_name": "Jo",
                "from_email": "jo@x.com",
                "subject": "Hi",
                "message": "Hello there"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    let deliverer = EmailJsDeliverer::new(settings_for(&server)).expect("settings ok");
    deliverer.deliver(&request()).await.expect("delivered");
}

#[tokio::test]
async fn rejected_request_reports_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("The user ID is invalid"))
        .mount(&server)
        .await;

    let deliverer = EmailJsDeliverer::new(settings_for(&server)).expect("settings ok");
    let err = deliverer.deliver(&request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(400));
    assert_eq!(err.message, "The user ID is invalid");
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(250)))
        .mount(&server)
        .await;

    let settings = DeliverySettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let deliverer = EmailJsDeliverer::new(settings).expect("settings ok");
    let err = deliverer.deliver(&request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn unreachable_service_is_a_network_failure() {
    let settings = DeliverySettings {
        endpoint: "http://127.0.0.1:1/api/v1.0/email/send".to_string(),
        service_id: "s".to_string(),
        template_id: "t".to_string(),
        public_key: "k".to_string(),
        ..DeliverySettings::default()
    };

    let deliverer = EmailJsDeliverer::new(settings).expect("settings ok");
    let err = deliverer.deliver(&request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}

#[tokio::test]
async fn malformed_endpoint_is_reported() {
    let settings = DeliverySettings {
        endpoint: "not a url".to_string(),
        service_id: "s".to_string(),
        template_id: "t".to_string(),
        public_key: "k".to_string(),
        ..DeliverySettings::default()
    };
    let deliverer = EmailJsDeliverer::new(settings).expect("settings ok");
    let err = deliverer.deliver(&request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidEndpoint);
}

#[test]
fn identifiers_are_required() {
    let err = EmailJsDeliverer::new(DeliverySettings::default()).unwrap_err();
    assert_eq!(err, SettingsError::Missing("service_id"));

    let settings = DeliverySettings {
        service_id: "s".to_string(),
        template_id: "t".to_string(),
        public_key: "  ".to_string(),
        ..DeliverySettings::default()
    };
    assert_eq!(settings.check(), Err(SettingsError::Missing("public_key")));
}
