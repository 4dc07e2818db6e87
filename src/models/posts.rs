use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Comment {
    pub username: String,
    pub comment: String,
    #[serde(rename = "imageComment")]
    pub image_comment: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Free-form category tags. These are expected, but not enforced, to
    /// match existing `Category` names.
    pub category: Vec<String>,
    #[serde(rename = "accountId")]
    pub account_id: Uuid,
    /// The author's display name as it was when the post was created.
    /// Deliberately stale: renaming the account does not rewrite posts.
    #[serde(rename = "accountName")]
    pub account_name: String,
    #[serde(rename = "imagePost")]
    pub image_post: String,
    #[serde(rename = "templateId")]
    pub template_id: Option<Uuid>,
    pub comments: Json<Vec<Comment>>,
    #[serde(rename = "viewsCount")]
    pub views_count: i64,
    #[serde(rename = "reportCount")]
    pub report_count: i64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// A submitted-but-unpersisted post. It only exists in transit: serialized
/// into the template-picker page and posted back with the chosen template.
/// Abandoning that page loses the draft.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    #[serde(rename = "imagePost")]
    pub image_post: String,
    #[serde(rename = "accountId")]
    pub account_id: Uuid,
    #[serde(rename = "accountName")]
    pub account_name: String,
    pub category: Vec<String>,
}

/// Partial update for a post edit. Everything but the image is replaced in
/// place; the image survives unless a new upload came in.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub title: String,
    pub content: String,
    pub category: Vec<String>,
    pub template_id: Option<Uuid>,
    pub image_post: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    pub username: String,
    pub comment: String,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PostIdForm {
    #[serde(rename = "postId")]
    pub post_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct PreviewTemplateForm {
    /// The serialized `PostDraft` carried through the template picker.
    pub data: String,
    #[serde(rename = "tempId")]
    pub temp_id: String,
}
