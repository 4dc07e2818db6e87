use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use crate::{
    models::users::{PendingRegistration, User},
    repositories::user_repo::UserRepository,
    Result,
};

/// One-time passcode for email ownership checks. Four digits, the same
/// fixed range the original flow drew from. Never stored server-side: it
/// travels to the inbox and back through the next form submission.
pub fn generate_otp() -> u32 {
    rand::thread_rng().gen_range(1000..2000)
}

pub enum LoginOutcome {
    Success(User),
    WrongPassword,
    UnknownUser,
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn email_taken(&self, email: &str) -> Result<bool> {
        Ok(self.users.find_user_by_email(email).await?.is_some())
    }

    pub fn hash_password(&self, plaintext: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(plaintext.as_bytes(), &salt)?.to_string();

        Ok(password_hash)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome> {
        let Some(user) = self.users.find_user_by_email(email).await? else {
            return Ok(LoginOutcome::UnknownUser);
        };

        let parsed_hash = PasswordHash::new(&user.password)?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(LoginOutcome::Success(user)),
            Err(_) => Ok(LoginOutcome::WrongPassword),
        }
    }

    /// Persist the profile fields that rode through the OTP page. The
    /// password inside `pending` is already hashed.
    pub async fn finalize_registration(&self, pending: PendingRegistration) -> Result<User> {
        let user = User {
            id: Uuid::now_v7(),
            first_name: pending.first_name,
            last_name: pending.last_name,
            address: pending.address,
            phone_number: pending.phone_number,
            occupation: pending.occupation,
            email: pending.email,
            password: pending.password,
            image_profile: None,
            created_at: Utc::now(),
        };

        self.users.insert_user(&user).await?;
        Ok(user)
    }

    /// Re-hash and store a new password. Returns false when no account
    /// carries that email.
    pub async fn reset_password(&self, email: &str, new_password: &str) -> Result<bool> {
        let password_hash = self.hash_password(new_password)?;
        self.users.update_password_by_email(email, &password_hash).await
    }
}
