use std::sync::Arc;

use crate::config::Config;

use super::sendmail::send_email;

/// Registration OTP. Spawned by the handler; the response never waits on
/// delivery.
pub async fn send_registration_otp(config: Arc<Config>, to_email: String, otp: u32) {
    let subject = "Please Verify Your Email";
    let body = format!("Your OTP for Creatorr verification is {otp}");
    send_email(&config, &to_email, subject, body).await;
}

/// Password-reset OTP.
pub async fn send_reset_otp(config: Arc<Config>, to_email: String, otp: u32) {
    let subject = "Please Verify Your Email";
    let body = format!("Your OTP for password reset is {otp}");
    send_email(&config, &to_email, subject, body).await;
}

/// Contact-form relay to the site inbox. The visitor's address goes into
/// the body; the mail itself is sent through the configured relay account.
pub async fn send_contact_mail(
    config: Arc<Config>,
    sender_name: String,
    sender_email: String,
    subject: String,
    text: String,
) {
    let to = config.contact_email.clone();
    let body = format!("From {sender_name} &lt;{sender_email}&gt;:<br><br>{text}");
    send_email(&config, &to, &subject, body).await;
}
