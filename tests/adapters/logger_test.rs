//! Logger transport tests.

use mailgun_service::providers::LoggerTransport;
use mailgun_service::{MailgunConfig, MailgunService};

#[tokio::test]
async fn brief_logger_accepts_message() {
    let mut service = MailgunService::with_transport(
        MailgunConfig::new("avengers.com", "fake-api-key"),
        LoggerTransport::new(),
    );
    service.to("steve.rogers@example.com").subject("Hello");

    let delivery = service.send().await.unwrap();
    assert!(!delivery.message_id.is_empty());
    assert!(delivery.provider_response.is_none());
}

#[tokio::test]
async fn full_logger_accepts_message_with_attachments() {
    let mut service = MailgunService::with_transport(
        MailgunConfig::new("avengers.com", "fake-api-key"),
        LoggerTransport::full(),
    );
    service
        .from("tony.stark@example.com", Some("Tony"))
        .to("steve.rogers@example.com")
        .text_message("Hello")
        .html_message("<p>Hello</p>")
        .attach("/tmp/not-read-by-logger.pdf");

    assert!(service.send().await.is_ok());
    assert_eq!(service.transport_name(), "logger");
}
