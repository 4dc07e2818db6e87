use std::time::Duration;

use lettre::{
    message::{header, SinglePart},
    transport::smtp::authentication::Credentials,
    Message, SmtpTransport, Transport,
};
use tracing::{error, info, warn};

use crate::config::Config;

/// Deliver one HTML mail through the configured relay. Outcomes are logged
/// and nothing more: no caller blocks a user-visible flow on delivery, and
/// nothing is retried.
pub async fn send_email(config: &Config, to: &str, subject: &str, html_body: String) {
    let from = match config.smtp_username.parse() {
        Ok(from) => from,
        Err(err) => {
            error!("Invalid sender address {:?}: {:?}", config.smtp_username, err);
            return;
        }
    };
    let to_mailbox = match to.parse() {
        Ok(to_mailbox) => to_mailbox,
        Err(err) => {
            warn!("Invalid recipient address {:?}: {:?}", to, err);
            return;
        }
    };

    let email = match Message::builder()
        .from(from)
        .to(to_mailbox)
        .subject(subject)
        .header(header::ContentType::TEXT_HTML)
        .singlepart(
            SinglePart::builder()
                .header(header::ContentType::TEXT_HTML)
                .body(html_body),
        ) {
        Ok(email) => email,
        Err(err) => {
            error!("Failed to build email: {:?}", err);
            return;
        }
    };

    let mailer = match SmtpTransport::starttls_relay(&config.smtp_server) {
        Ok(builder) => builder
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ))
            .port(config.smtp_port)
            .timeout(Some(Duration::from_secs(10)))
            .build(),
        Err(err) => {
            error!("Failed to build SMTP transport: {:?}", err);
            return;
        }
    };

    let result = tokio::task::spawn_blocking(move || mailer.send(&email)).await;
    match result {
        Ok(Ok(_)) => info!("Email sent successfully!"),
        Ok(Err(err)) => error!("Failed to send email: {:?}", err),
        Err(err) => error!("Email send task failed: {:?}", err),
    }
}
