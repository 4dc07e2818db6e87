use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    models::{
        categories::{Category, Template},
        posts::{Comment, Post, PostUpdate},
        query::{FeedQuery, FeedScope, SearchField},
        users::{ProfileUpdate, User},
    },
    Result,
};

use super::{
    category_repo::CategoryRepository, post_repo::PostRepository,
    template_repo::TemplateRepository, user_repo::UserRepository,
};

/// In-memory stand-in for the document store, for unit tests. Vectors keep
/// insertion order, so "newest first" is simply reverse iteration.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    posts: Mutex<Vec<Post>>,
    categories: Mutex<Vec<Category>>,
    templates: Mutex<Vec<Template>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed_template(&self, template: Template) {
        self.templates.lock().await.push(template);
    }
}

fn matches_scope(post: &Post, scope: &FeedScope) -> bool {
    match scope {
        FeedScope::Global => true,
        FeedScope::Category(name) => post.category.iter().any(|c| c == name),
        FeedScope::Author(account_id) => post.account_id == *account_id,
    }
}

fn matches_search(post: &Post, query: &FeedQuery) -> bool {
    let Some(term) = &query.search else {
        return true;
    };
    let needle = term.to_lowercase();

    query.search_fields().iter().any(|field| match field {
        SearchField::Title => post.title.to_lowercase().contains(&needle),
        SearchField::Content => post.content.to_lowercase().contains(&needle),
        SearchField::AccountName => post.account_name.to_lowercase().contains(&needle),
        SearchField::Category => post
            .category
            .iter()
            .any(|c| c.to_lowercase().contains(&needle)),
    })
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn insert_post(&self, post: &Post) -> Result<()> {
        self.posts.lock().await.push(post.clone());
        Ok(())
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        Ok(self
            .posts
            .lock()
            .await
            .iter()
            .find(|p| p.id == post_id)
            .cloned())
    }

    async fn find_posts(&self, query: &FeedQuery) -> Result<Vec<Post>> {
        Ok(self
            .posts
            .lock()
            .await
            .iter()
            .rev()
            .filter(|p| matches_scope(p, &query.scope) && matches_search(p, query))
            .skip(query.offset() as usize)
            .take(query.limit as usize)
            .cloned()
            .collect())
    }

    async fn count_posts(&self, query: &FeedQuery) -> Result<u64> {
        Ok(self
            .posts
            .lock()
            .await
            .iter()
            .filter(|p| matches_scope(p, &query.scope) && matches_search(p, query))
            .count() as u64)
    }

    async fn most_viewed(&self) -> Result<Option<Post>> {
        Ok(self
            .posts
            .lock()
            .await
            .iter()
            .max_by_key(|p| p.views_count)
            .cloned())
    }

    async fn related_posts(&self, post: &Post, limit: u32) -> Result<Vec<Post>> {
        Ok(self
            .posts
            .lock()
            .await
            .iter()
            .rev()
            .filter(|p| p.id != post.id && p.category.iter().any(|c| post.category.contains(c)))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn reported_posts(&self) -> Result<Vec<Post>> {
        let mut posts: Vec<Post> = self
            .posts
            .lock()
            .await
            .iter()
            .filter(|p| p.report_count > 0)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.report_count.cmp(&a.report_count));
        Ok(posts)
    }

    async fn all_posts(&self) -> Result<Vec<Post>> {
        Ok(self.posts.lock().await.iter().rev().cloned().collect())
    }

    async fn update_post(&self, post_id: Uuid, update: &PostUpdate) -> Result<bool> {
        let mut posts = self.posts.lock().await;
        let Some(post) = posts.iter_mut().find(|p| p.id == post_id) else {
            return Ok(false);
        };
        post.title = update.title.clone();
        post.content = update.content.clone();
        post.category = update.category.clone();
        post.template_id = update.template_id;
        if let Some(image) = &update.image_post {
            post.image_post = image.clone();
        }
        Ok(true)
    }

    async fn append_comment(&self, post_id: Uuid, comment: &Comment) -> Result<bool> {
        let mut posts = self.posts.lock().await;
        let Some(post) = posts.iter_mut().find(|p| p.id == post_id) else {
            return Ok(false);
        };
        post.comments.0.push(comment.clone());
        Ok(true)
    }

    async fn increment_views(&self, post_id: Uuid) -> Result<Option<Post>> {
        let mut posts = self.posts.lock().await;
        let Some(post) = posts.iter_mut().find(|p| p.id == post_id) else {
            return Ok(None);
        };
        post.views_count += 1;
        Ok(Some(post.clone()))
    }

    async fn increment_reports(&self, post_id: Uuid) -> Result<bool> {
        let mut posts = self.posts.lock().await;
        let Some(post) = posts.iter_mut().find(|p| p.id == post_id) else {
            return Ok(false);
        };
        post.report_count += 1;
        Ok(true)
    }

    async fn reset_reports(&self, post_id: Uuid) -> Result<bool> {
        let mut posts = self.posts.lock().await;
        let Some(post) = posts.iter_mut().find(|p| p.id == post_id) else {
            return Ok(false);
        };
        post.report_count = 0;
        Ok(true)
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<bool> {
        let mut posts = self.posts.lock().await;
        let before = posts.len();
        posts.retain(|p| p.id != post_id);
        Ok(posts.len() < before)
    }

    async fn delete_posts_by_author(&self, account_id: Uuid) -> Result<u64> {
        let mut posts = self.posts.lock().await;
        let before = posts.len();
        posts.retain(|p| p.account_id != account_id);
        Ok((before - posts.len()) as u64)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<()> {
        self.users.lock().await.push(user.clone());
        Ok(())
    }

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|u| u.id == user_id)
            .cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn all_users(&self) -> Result<Vec<User>> {
        Ok(self.users.lock().await.iter().rev().cloned().collect())
    }

    async fn update_profile(&self, user_id: Uuid, update: &ProfileUpdate) -> Result<bool> {
        let mut users = self.users.lock().await;
        let Some(user) = users.iter_mut().find(|u| u.id == user_id) else {
            return Ok(false);
        };
        user.first_name = update.first_name.clone();
        user.last_name = update.last_name.clone();
        user.address = update.address.clone();
        user.phone_number = update.phone_number.clone();
        user.occupation = update.occupation.clone();
        if let Some(image) = &update.image_profile {
            user.image_profile = Some(image.clone());
        }
        Ok(true)
    }

    async fn update_password_by_email(&self, email: &str, password_hash: &str) -> Result<bool> {
        let mut users = self.users.lock().await;
        let Some(user) = users.iter_mut().find(|u| u.email == email) else {
            return Ok(false);
        };
        user.password = password_hash.to_string();
        Ok(true)
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<bool> {
        let mut users = self.users.lock().await;
        let before = users.len();
        users.retain(|u| u.id != user_id);
        Ok(users.len() < before)
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn insert_category(&self, category: &Category) -> Result<()> {
        self.categories.lock().await.push(category.clone());
        Ok(())
    }

    async fn find_category(&self, category_id: Uuid) -> Result<Option<Category>> {
        Ok(self
            .categories
            .lock()
            .await
            .iter()
            .find(|c| c.id == category_id)
            .cloned())
    }

    async fn all_categories(&self) -> Result<Vec<Category>> {
        Ok(self.categories.lock().await.clone())
    }

    async fn update_category(
        &self,
        category_id: Uuid,
        name: &str,
        image_url: Option<&str>,
    ) -> Result<bool> {
        let mut categories = self.categories.lock().await;
        let Some(category) = categories.iter_mut().find(|c| c.id == category_id) else {
            return Ok(false);
        };
        category.name = name.to_string();
        if let Some(image_url) = image_url {
            category.image_url = image_url.to_string();
        }
        Ok(true)
    }

    async fn delete_category(&self, category_id: Uuid) -> Result<bool> {
        let mut categories = self.categories.lock().await;
        let before = categories.len();
        categories.retain(|c| c.id != category_id);
        Ok(categories.len() < before)
    }
}

#[async_trait]
impl TemplateRepository for MemoryStore {
    async fn all_templates(&self) -> Result<Vec<Template>> {
        Ok(self.templates.lock().await.clone())
    }
}
