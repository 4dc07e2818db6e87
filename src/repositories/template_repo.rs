use async_trait::async_trait;

use crate::{models::categories::Template, Result};

use super::PostgresRepo;

/// Templates are read-only reference data seeded by migration; no route
/// creates or edits them.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn all_templates(&self) -> Result<Vec<Template>>;
}

#[async_trait]
impl TemplateRepository for PostgresRepo {
    async fn all_templates(&self) -> Result<Vec<Template>> {
        let templates =
            sqlx::query_as::<_, Template>("SELECT id, name, image FROM templates ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(templates)
    }
}
