use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: Uuid,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub address: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    pub occupation: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "imageProfile")]
    pub image_profile: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Display name as shown on posts. Captured into `Post::account_name`
    /// at creation time and never re-synced afterwards.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "First name is required"))]
    #[serde(rename = "inputFirstName")]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    #[serde(rename = "inputLastName")]
    pub last_name: String,
    #[serde(rename = "inputAddress")]
    pub address: String,
    #[serde(rename = "inputNumber")]
    pub phone_number: String,
    #[serde(rename = "inputOccupation")]
    pub occupation: String,
    #[validate(email(message = "Invalid email address"))]
    #[serde(rename = "inputEmail")]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[serde(rename = "inputPassword")]
    pub password: String,
}

/// Profile fields carried through the OTP page's hidden form fields. The
/// password here is already hashed; nothing is re-validated on the way back
/// in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingRegistration {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub address: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    pub occupation: String,
    pub email: String,
    pub password: String,
}

#[derive(Validate, Debug, Clone, Deserialize)]
pub struct LoginForm {
    #[validate(email(message = "Email is invalid"))]
    #[serde(rename = "inputEmail")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[serde(rename = "inputPassword")]
    pub password: String,
}

/// OTP confirmation for registration: the emailed code, the code the user
/// typed, and the pending profile fields riding along as hidden inputs.
#[derive(Debug, Deserialize)]
pub struct RegisterOtpForm {
    #[serde(rename = "sentOTP")]
    pub sent_otp: String,
    #[serde(rename = "inputOTP")]
    pub entered_otp: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub address: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    pub occupation: String,
    pub email: String,
    pub password: String,
}

impl RegisterOtpForm {
    pub fn into_pending(self) -> PendingRegistration {
        PendingRegistration {
            first_name: self.first_name,
            last_name: self.last_name,
            address: self.address,
            phone_number: self.phone_number,
            occupation: self.occupation,
            email: self.email,
            password: self.password,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EmailVerifyForm {
    #[serde(rename = "inputEmail")]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct OtpCheckForm {
    #[serde(rename = "sentOTP")]
    pub sent_otp: String,
    #[serde(rename = "userOTP")]
    pub entered_otp: String,
}

#[derive(Debug, Deserialize)]
pub struct PasswordResetForm {
    #[serde(rename = "inputEmail")]
    pub email: String,
    #[serde(rename = "inputPassword")]
    pub password: String,
    #[serde(rename = "confirminputPassword")]
    pub password_confirm: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteAccountForm {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ContactForm {
    #[serde(rename = "senderName")]
    pub sender_name: String,
    #[serde(rename = "senderEmail")]
    pub sender_email: String,
    #[serde(rename = "senderSubject")]
    pub sender_subject: String,
    #[serde(rename = "senderText")]
    pub sender_text: String,
}

/// Fields a profile update may change. The image is replaced only when a
/// new file was uploaded.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone_number: String,
    pub occupation: String,
    pub image_profile: Option<String>,
}
