use async_trait::async_trait;
use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::{models::categories::Category, Result};

use super::PostgresRepo;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn insert_category(&self, category: &Category) -> Result<()>;
    async fn find_category(&self, category_id: Uuid) -> Result<Option<Category>>;
    async fn all_categories(&self) -> Result<Vec<Category>>;
    /// Rename and, when a new image was uploaded, re-point the image.
    async fn update_category(
        &self,
        category_id: Uuid,
        name: &str,
        image_url: Option<&str>,
    ) -> Result<bool>;
    async fn delete_category(&self, category_id: Uuid) -> Result<bool>;
}

#[async_trait]
impl CategoryRepository for PostgresRepo {
    async fn insert_category(&self, category: &Category) -> Result<()> {
        sqlx::query("INSERT INTO categories (id, name, image_url) VALUES ($1, $2, $3)")
            .bind(category.id)
            .bind(&category.name)
            .bind(&category.image_url)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_category(&self, category_id: Uuid) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, image_url FROM categories WHERE id = $1",
        )
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn all_categories(&self) -> Result<Vec<Category>> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT id, name, image_url FROM categories ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(categories)
    }

    async fn update_category(
        &self,
        category_id: Uuid,
        name: &str,
        image_url: Option<&str>,
    ) -> Result<bool> {
        let mut qb = QueryBuilder::new("UPDATE categories SET name = ");
        qb.push_bind(name.to_string());
        if let Some(image_url) = image_url {
            qb.push(", image_url = ");
            qb.push_bind(image_url.to_string());
        }
        qb.push(" WHERE id = ");
        qb.push_bind(category_id);

        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_category(&self, category_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(category_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
