use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::models::{
    categories::{Category, Template},
    posts::{Comment, Post},
    users::User,
};

/// A named view plus its data bag. Rendering itself is out of scope; the
/// contract is the view name and the exact field set each view consumes.
pub struct View<T: Serialize> {
    name: &'static str,
    data: T,
}

pub fn render<T: Serialize>(name: &'static str, data: T) -> View<T> {
    View { name, data }
}

impl<T: Serialize> IntoResponse for View<T> {
    fn into_response(self) -> Response {
        Json(json!({ "view": self.name, "data": self.data })).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub posts: Vec<Post>,
    pub total_pages: u64,
    pub current_page: u32,
    pub categories: Vec<Category>,
    pub featured_post: Option<Post>,
    pub is_session: bool,
    pub user: Option<User>,
    pub messages: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub posts: Vec<Post>,
    pub total_pages: u64,
    pub current_page: u32,
    pub search_term: String,
    pub is_session: bool,
    pub user: Option<User>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryIndexPage {
    pub categories: Vec<Category>,
    pub is_session: bool,
    pub user: Option<User>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFeedPage {
    pub posts: Vec<Post>,
    pub name: String,
    pub total_pages: u64,
    pub current_page: u32,
    pub search_term: String,
    pub user: Option<User>,
    pub is_session: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    pub title: String,
    pub content: String,
    pub id: uuid::Uuid,
    pub name: String,
    pub image: String,
    pub comments: Vec<Comment>,
    pub category: Vec<String>,
    pub is_session: bool,
    pub user: Option<User>,
    pub post_user: Option<User>,
    pub temp_id: Option<uuid::Uuid>,
    pub views_count: i64,
    pub related_posts: Vec<Post>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPage {
    pub user: User,
    pub messages: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnPostsPage {
    pub posts: Vec<Post>,
    pub total_pages: u64,
    pub current_page: u32,
    pub categories: Vec<Category>,
    pub search_term: String,
    pub user: User,
    pub messages: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePage {
    pub user: User,
}

/// Template picker shown between draft submission and publication. The
/// draft rides along as a serialized payload in a hidden field.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePickerPage {
    pub newpost: String,
    pub all_templates: Vec<Template>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditPostPage {
    pub post: Post,
    pub categories: Vec<Category>,
    pub all_templates: Vec<Template>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesPage {
    pub messages: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticPage {
    pub is_session: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPage {
    pub is_session: bool,
    pub messages: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverviewPage {
    pub users: Vec<User>,
    pub posts: Vec<Post>,
    pub categories: Vec<Category>,
    pub messages: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUsersPage {
    pub users: Vec<User>,
    pub messages: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminPostsPage {
    pub posts: Vec<Post>,
    pub messages: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCategoriesPage {
    pub categories: Vec<Category>,
    pub messages: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryPage {
    pub category: Category,
}

/// Registration OTP page: the generated code and the pending profile
/// fields are both embedded so the next request can carry them back.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOtpPage {
    pub otp: u32,
    pub usernew: crate::models::users::PendingRegistration,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetOtpPage {
    pub otp: u32,
}
