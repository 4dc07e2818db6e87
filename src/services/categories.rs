use std::sync::Arc;

use uuid::Uuid;

use crate::{
    models::categories::Category, repositories::category_repo::CategoryRepository, Error, Result,
};

#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    pub async fn list(&self) -> Result<Vec<Category>> {
        self.categories.all_categories().await
    }

    pub async fn get(&self, category_id: Uuid) -> Result<Category> {
        let category = self.categories.find_category(category_id).await?;
        category.ok_or(Error::NotFound)
    }

    pub async fn create(&self, name: String, image_url: String) -> Result<Category> {
        let category = Category {
            id: Uuid::now_v7(),
            name,
            image_url,
        };
        self.categories.insert_category(&category).await?;
        Ok(category)
    }

    pub async fn update(
        &self,
        category_id: Uuid,
        name: &str,
        image_url: Option<&str>,
    ) -> Result<bool> {
        self.categories
            .update_category(category_id, name, image_url)
            .await
    }

    pub async fn delete(&self, category_id: Uuid) -> Result<bool> {
        self.categories.delete_category(category_id).await
    }
}
