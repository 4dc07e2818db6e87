use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// A named visual layout a post is rendered against. Seed data only; the
/// routes never create or edit templates.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Template {
    pub id: Uuid,
    pub name: String,
    pub image: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryIdForm {
    #[serde(rename = "catId")]
    pub category_id: Uuid,
}
