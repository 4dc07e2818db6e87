use std::{
    collections::HashMap,
    sync::Arc,
};

use rand::Rng;
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::users::User;

pub const SESSION_COOKIE: &str = "user_sid";

/// The authenticated identity held by a session: the user's id plus a
/// snapshot of the record taken at login. The snapshot is not re-fetched
/// on profile edits; handlers that display the user resolve it freshly
/// from the store instead.
#[derive(Debug, Clone, Serialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub snapshot: User,
}

#[derive(Debug, Default)]
struct SessionEntry {
    user: Option<SessionUser>,
    flash: HashMap<String, Vec<String>>,
}

/// In-process session state keyed by the opaque token the browser holds.
/// Entries die with the process; a cookie that outlives the server is
/// detected and cleared by the request-context middleware.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, SessionEntry>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an anonymous session and return its token.
    pub async fn start(&self) -> String {
        let token = generate_token();
        self.inner
            .write()
            .await
            .insert(token.clone(), SessionEntry::default());
        token
    }

    pub async fn exists(&self, token: &str) -> bool {
        self.inner.read().await.contains_key(token)
    }

    /// Attach an authenticated identity to an existing session,
    /// snapshotting the user record as of now.
    pub async fn authenticate(&self, token: &str, user: &User) {
        if let Some(entry) = self.inner.write().await.get_mut(token) {
            entry.user = Some(SessionUser {
                id: user.id,
                snapshot: user.clone(),
            });
        }
    }

    pub async fn user(&self, token: &str) -> Option<SessionUser> {
        self.inner.read().await.get(token)?.user.clone()
    }

    pub async fn destroy(&self, token: &str) {
        self.inner.write().await.remove(token);
    }

    /// Queue a one-shot message under a named bucket for this session.
    pub async fn flash(&self, token: &str, bucket: &str, message: impl Into<String>) {
        if let Some(entry) = self.inner.write().await.get_mut(token) {
            entry
                .flash
                .entry(bucket.to_string())
                .or_default()
                .push(message.into());
        }
    }

    /// Drain a flash bucket: the messages are returned once and the bucket
    /// is cleared.
    pub async fn take_flash(&self, token: &str, bucket: &str) -> Vec<String> {
        match self.inner.write().await.get_mut(token) {
            Some(entry) => entry.flash.remove(bucket).unwrap_or_default(),
            None => Vec::new(),
        }
    }
}

/// Cryptographically random 32-byte hex token.
fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 32] = rng.gen();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::now_v7(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            address: "12 St James Square".to_string(),
            phone_number: "5550100".to_string(),
            occupation: "Analyst".to_string(),
            email: "ada@example.com".to_string(),
            password: "hash".to_string(),
            image_profile: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn generated_tokens_are_64_hex_chars_and_unique() {
        let t1 = generate_token();
        let t2 = generate_token();
        assert_eq!(t1.len(), 64);
        assert!(t1.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(t1, t2);
    }

    #[tokio::test]
    async fn unknown_token_resolves_to_nobody() {
        let store = SessionStore::new();
        assert!(!store.exists("missing").await);
        assert!(store.user("missing").await.is_none());
    }

    #[tokio::test]
    async fn authenticate_then_destroy() {
        let store = SessionStore::new();
        let user = sample_user();
        let token = store.start().await;
        assert!(store.user(&token).await.is_none());

        store.authenticate(&token, &user).await;
        assert_eq!(store.user(&token).await.unwrap().id, user.id);

        store.destroy(&token).await;
        assert!(!store.exists(&token).await);
        assert!(store.user(&token).await.is_none());
    }

    #[tokio::test]
    async fn snapshot_is_taken_at_login_time() {
        let store = SessionStore::new();
        let mut user = sample_user();
        let token = store.start().await;
        store.authenticate(&token, &user).await;

        // A later profile edit does not reach into the session copy.
        user.first_name = "Augusta".to_string();
        let held = store.user(&token).await.unwrap();
        assert_eq!(held.snapshot.first_name, "Ada");
    }

    #[tokio::test]
    async fn flash_is_one_shot_and_per_bucket() {
        let store = SessionStore::new();
        let token = store.start().await;
        store.flash(&token, "login", "Wrong Password! Try Again").await;
        store.flash(&token, "login", "Second notice").await;
        store.flash(&token, "post", "Post Deleted Successfully!").await;

        let login = store.take_flash(&token, "login").await;
        assert_eq!(login.len(), 2);
        assert!(store.take_flash(&token, "login").await.is_empty());
        assert_eq!(store.take_flash(&token, "post").await.len(), 1);
    }

    #[tokio::test]
    async fn flash_never_leaks_across_sessions() {
        let store = SessionStore::new();
        let a = store.start().await;
        let b = store.start().await;
        store.flash(&a, "home", "Posted Successfully").await;

        assert!(store.take_flash(&b, "home").await.is_empty());
        assert_eq!(store.take_flash(&a, "home").await.len(), 1);
    }
}
