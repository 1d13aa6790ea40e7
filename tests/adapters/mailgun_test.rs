//! Mailgun transport tests.

use mailgun_service::providers::MailgunTransport;
use mailgun_service::{AttachedFile, MailError, MailgunConfig, MailgunService, Transport};
use serde_json::json;
use std::io::Write;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helper Functions
// ============================================================================

fn service(server: &MockServer) -> MailgunService {
    MailgunService::new(MailgunConfig::new("avengers.com", "fake-api-key").base_url(server.uri()))
}

fn valid_message(service: &mut MailgunService) {
    service
        .from("tony.stark@example.com", None)
        .to("steve.rogers@example.com")
        .subject("Hello, Avengers!")
        .html_message("<h1>Hello</h1>");
}

fn success_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "message": "Queued. Thank you.",
        "id": "<20111114174239.25659.5817@samples.mailgun.org>"
    }))
}

// ============================================================================
// Basic Delivery Tests
// ============================================================================

#[tokio::test]
async fn successful_send_returns_ok() {
    let server = MockServer::start().await;
    let mut service = service(&server);
    valid_message(&mut service);

    // Mailgun uses Basic auth with "api:key" format
    let expected_auth = format!(
        "Basic {}",
        base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            "api:fake-api-key"
        )
    );

    Mock::given(method("POST"))
        .and(path("/avengers.com/messages"))
        .and(header("Authorization", expected_auth.as_str()))
        .respond_with(success_response())
        .expect(1)
        .mount(&server)
        .await;

    let delivery = service.send().await.unwrap();
    assert_eq!(
        delivery.message_id,
        "<20111114174239.25659.5817@samples.mailgun.org>"
    );
    assert_eq!(
        delivery.provider_response,
        Some(json!({"provider": "mailgun", "message": "Queued. Thank you."}))
    );
}

#[tokio::test]
async fn send_posts_every_field() {
    let server = MockServer::start().await;
    let mut service = service(&server);

    service
        .from("tony.stark@example.com", Some("T Stark"))
        .to("steve.rogers@example.com")
        .cc("hulk.smash@example.com")
        .bcc("hawk.eye@example.com")
        .reply_to("office.avengers@example.com")
        .subject("Hello, Avengers!")
        .text_message("Hello")
        .html_message("<h1>Hello</h1>")
        .set_header("X-Mailer", "mailgun-service");

    Mock::given(method("POST"))
        .and(path("/avengers.com/messages"))
        .and(body_string_contains("name=\"to\""))
        .and(body_string_contains("steve.rogers@example.com"))
        .and(body_string_contains("T Stark <tony.stark@example.com>"))
        .and(body_string_contains("hulk.smash@example.com"))
        .and(body_string_contains("hawk.eye@example.com"))
        .and(body_string_contains("office.avengers@example.com"))
        .and(body_string_contains("name=\"subject\""))
        .and(body_string_contains("<h1>Hello</h1>"))
        .and(body_string_contains("X-Mailer"))
        .respond_with(success_response())
        .expect(1)
        .mount(&server)
        .await;

    assert!(service.send().await.is_ok());
}

#[tokio::test]
async fn send_sets_user_agent() {
    let server = MockServer::start().await;
    let mut service = service(&server);
    valid_message(&mut service);

    let user_agent = format!("mailgun-service/{}", mailgun_service::VERSION);
    Mock::given(method("POST"))
        .and(header("User-Agent", user_agent.as_str()))
        .respond_with(success_response())
        .expect(1)
        .mount(&server)
        .await;

    assert!(service.send().await.is_ok());
}

#[tokio::test]
async fn send_uploads_attachments() {
    let server = MockServer::start().await;
    let mut service = service(&server);
    valid_message(&mut service);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"quarterly numbers").unwrap();

    service
        .attach_file(AttachedFile::new(file.path()).rename("report.pdf"))
        .attach_file(
            AttachedFile::new(file.path())
                .inline()
                .rename("logo.png")
                .mime_type("image/png"),
        );

    Mock::given(method("POST"))
        .and(path("/avengers.com/messages"))
        .and(body_string_contains("name=\"attachment\"; filename=\"report.pdf\""))
        .and(body_string_contains("name=\"inline\"; filename=\"logo.png\""))
        .and(body_string_contains("Content-Type: application/pdf"))
        .and(body_string_contains("Content-Type: image/png"))
        .and(body_string_contains("quarterly numbers"))
        .respond_with(success_response())
        .expect(1)
        .mount(&server)
        .await;

    assert!(service.send().await.is_ok());
}

#[tokio::test]
async fn missing_attachment_fails_before_request() {
    let server = MockServer::start().await;
    let mut service = service(&server);
    valid_message(&mut service);
    service.attach("/definitely/not/here.pdf");

    Mock::given(method("POST"))
        .respond_with(success_response())
        .expect(0)
        .mount(&server)
        .await;

    let err = service.send().await.unwrap_err();
    assert!(matches!(err, MailError::AttachmentFileNotFound(_)));
}

#[tokio::test]
async fn empty_message_is_still_sent() {
    let server = MockServer::start().await;
    let service = service(&server);

    Mock::given(method("POST"))
        .and(path("/avengers.com/messages"))
        .respond_with(success_response())
        .expect(1)
        .mount(&server)
        .await;

    assert!(service.send().await.is_ok());
}

// ============================================================================
// Error Response Tests
// ============================================================================

#[tokio::test]
async fn send_with_401_response() {
    let server = MockServer::start().await;
    let mut service = service(&server);
    valid_message(&mut service);

    Mock::given(method("POST"))
        .and(path("/avengers.com/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Forbidden"))
        .expect(1)
        .mount(&server)
        .await;

    let err = service.send().await.unwrap_err();
    assert!(err.to_string().contains("Forbidden"));
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn send_with_json_error_uses_message() {
    let server = MockServer::start().await;
    let mut service = service(&server);
    valid_message(&mut service);

    Mock::given(method("POST"))
        .and(path("/avengers.com/messages"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "'from' parameter is not a valid address. please check documentation"
        })))
        .expect(1)
        .mount(&server)
        .await;

    match service.send().await.unwrap_err() {
        MailError::ProviderError {
            provider,
            message,
            status,
        } => {
            assert_eq!(provider, "mailgun");
            assert!(message.starts_with("'from' parameter"));
            assert_eq!(status, Some(400));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn send_with_500_response() {
    let server = MockServer::start().await;
    let mut service = service(&server);
    valid_message(&mut service);

    Mock::given(method("POST"))
        .and(path("/avengers.com/messages"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "errors": ["The provided authorization grant is invalid, expired, or revoked"],
            "message": "error"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = service.send().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn send_with_unreachable_server() {
    // Reserve a free port, then release it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut service = MailgunService::new(
        MailgunConfig::new("avengers.com", "fake-api-key").base_url(format!("http://{}", addr)),
    );
    valid_message(&mut service);

    let err = service.send().await.unwrap_err();
    assert!(matches!(err, MailError::HttpError(_)), "unexpected error: {err:?}");
    assert_eq!(err.status(), None);
}

// ============================================================================
// Endpoint Tests
// ============================================================================

#[tokio::test]
async fn send_with_eu_base_url_returns_ok() {
    let server = MockServer::start().await;
    // Simulate EU endpoint by using custom base_url
    let mut service =
        MailgunService::new(MailgunConfig::new("avengers.eu", "fake-api-key").base_url(server.uri()));
    valid_message(&mut service);

    Mock::given(method("POST"))
        .and(path("/avengers.eu/messages"))
        .respond_with(success_response())
        .expect(1)
        .mount(&server)
        .await;

    assert!(service.send().await.is_ok());
}

#[test]
fn provider_name_returns_mailgun() {
    assert_eq!(MailgunTransport::new().provider_name(), "mailgun");

    let service = MailgunService::new(MailgunConfig::new("avengers.com", "fake-api-key"));
    assert_eq!(service.transport_name(), "mailgun");
}
