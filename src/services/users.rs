use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::{
    models::users::{ProfileUpdate, User},
    repositories::{post_repo::PostRepository, user_repo::UserRepository},
    Error, Result,
};

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { users, posts }
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<User> {
        let user = self.users.find_user(user_id).await?;
        user.ok_or(Error::NotFound)
    }

    pub async fn find_user(&self, user_id: Uuid) -> Result<Option<User>> {
        self.users.find_user(user_id).await
    }

    pub async fn update_profile(&self, user_id: Uuid, update: &ProfileUpdate) -> Result<bool> {
        self.users.update_profile(user_id, update).await
    }

    /// Account removal cascades to the account's posts and nothing else:
    /// other users' posts and category data stay untouched.
    pub async fn delete_account(&self, user_id: Uuid) -> Result<bool> {
        let deleted = self.users.delete_user(user_id).await?;
        if deleted {
            let removed = self.posts.delete_posts_by_author(user_id).await?;
            info!(user_id = %user_id, posts_removed = removed, "account deleted");
        }
        Ok(deleted)
    }

    pub async fn all_users(&self) -> Result<Vec<User>> {
        self.users.all_users().await
    }
}
