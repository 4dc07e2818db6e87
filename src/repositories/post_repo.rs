use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    models::{
        posts::{Comment, Post, PostUpdate},
        query::{FeedQuery, FeedScope, SearchField},
    },
    Result,
};

use super::PostgresRepo;

const POST_COLUMNS: &str = "id, title, content, category, account_id, account_name, image_post, template_id, comments, views_count, report_count, created_at";

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn insert_post(&self, post: &Post) -> Result<()>;
    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>>;
    /// Planner-driven listing: filtered, newest-first, paginated.
    async fn find_posts(&self, query: &FeedQuery) -> Result<Vec<Post>>;
    /// Total match count for the same filter, for page-count math.
    async fn count_posts(&self, query: &FeedQuery) -> Result<u64>;
    /// The single most-viewed post, if any.
    async fn most_viewed(&self) -> Result<Option<Post>>;
    /// Posts sharing at least one category tag, excluding the post itself.
    async fn related_posts(&self, post: &Post, limit: u32) -> Result<Vec<Post>>;
    /// Posts with at least one open report, most-reported first.
    async fn reported_posts(&self) -> Result<Vec<Post>>;
    async fn all_posts(&self) -> Result<Vec<Post>>;
    async fn update_post(&self, post_id: Uuid, update: &PostUpdate) -> Result<bool>;
    async fn append_comment(&self, post_id: Uuid, comment: &Comment) -> Result<bool>;
    /// Atomic `views_count + 1`; returns the updated post.
    async fn increment_views(&self, post_id: Uuid) -> Result<Option<Post>>;
    async fn increment_reports(&self, post_id: Uuid) -> Result<bool>;
    async fn reset_reports(&self, post_id: Uuid) -> Result<bool>;
    async fn delete_post(&self, post_id: Uuid) -> Result<bool>;
    /// Cascade half of account deletion: removes every post whose owner
    /// reference matches.
    async fn delete_posts_by_author(&self, account_id: Uuid) -> Result<u64>;
}

/// Translate a `FeedQuery`'s scope and search into SQL. Substring matching
/// is ILIKE, so an empty term keeps matching every row.
fn push_feed_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &FeedQuery) {
    qb.push(" WHERE TRUE");

    match &query.scope {
        FeedScope::Global => {}
        FeedScope::Category(name) => {
            qb.push(" AND ");
            qb.push_bind(name.clone());
            qb.push(" = ANY(category)");
        }
        FeedScope::Author(account_id) => {
            qb.push(" AND account_id = ");
            qb.push_bind(*account_id);
        }
    }

    if let Some(term) = &query.search {
        let pattern = format!("%{term}%");
        qb.push(" AND (");
        for (i, field) in query.search_fields().iter().enumerate() {
            if i > 0 {
                qb.push(" OR ");
            }
            match field {
                SearchField::Title => {
                    qb.push("title ILIKE ");
                    qb.push_bind(pattern.clone());
                }
                SearchField::Content => {
                    qb.push("content ILIKE ");
                    qb.push_bind(pattern.clone());
                }
                SearchField::AccountName => {
                    qb.push("account_name ILIKE ");
                    qb.push_bind(pattern.clone());
                }
                SearchField::Category => {
                    qb.push("EXISTS (SELECT 1 FROM unnest(category) AS tag WHERE tag ILIKE ");
                    qb.push_bind(pattern.clone());
                    qb.push(")");
                }
            }
        }
        qb.push(")");
    }
}

#[async_trait]
impl PostRepository for PostgresRepo {
    async fn insert_post(&self, post: &Post) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, title, content, category, account_id, account_name, image_post, template_id, comments, views_count, report_count, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.category)
        .bind(post.account_id)
        .bind(&post.account_name)
        .bind(&post.image_post)
        .bind(post.template_id)
        .bind(&post.comments)
        .bind(post.views_count)
        .bind(post.report_count)
        .bind(post.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn find_posts(&self, query: &FeedQuery) -> Result<Vec<Post>> {
        let mut qb = QueryBuilder::new(format!("SELECT {POST_COLUMNS} FROM posts"));
        push_feed_filters(&mut qb, query);
        qb.push(" ORDER BY id DESC LIMIT ");
        qb.push_bind(query.limit as i64);
        qb.push(" OFFSET ");
        qb.push_bind(query.offset() as i64);

        let posts = qb.build_query_as::<Post>().fetch_all(&self.pool).await?;
        Ok(posts)
    }

    async fn count_posts(&self, query: &FeedQuery) -> Result<u64> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM posts");
        push_feed_filters(&mut qb, query);

        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count as u64)
    }

    async fn most_viewed(&self) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY views_count DESC LIMIT 1"
        ))
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn related_posts(&self, post: &Post, limit: u32) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id <> $1 AND category && $2 ORDER BY id DESC LIMIT $3"
        ))
        .bind(post.id)
        .bind(&post.category)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn reported_posts(&self) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE report_count > 0 ORDER BY report_count DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn all_posts(&self) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn update_post(&self, post_id: Uuid, update: &PostUpdate) -> Result<bool> {
        let mut qb = QueryBuilder::new("UPDATE posts SET title = ");
        qb.push_bind(update.title.clone());
        qb.push(", content = ");
        qb.push_bind(update.content.clone());
        qb.push(", category = ");
        qb.push_bind(update.category.clone());
        qb.push(", template_id = ");
        qb.push_bind(update.template_id);
        if let Some(image) = &update.image_post {
            qb.push(", image_post = ");
            qb.push_bind(image.clone());
        }
        qb.push(" WHERE id = ");
        qb.push_bind(post_id);

        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn append_comment(&self, post_id: Uuid, comment: &Comment) -> Result<bool> {
        let result = sqlx::query("UPDATE posts SET comments = comments || $2 WHERE id = $1")
            .bind(post_id)
            .bind(serde_json::json!([comment]))
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_views(&self, post_id: Uuid) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(&format!(
            "UPDATE posts SET views_count = views_count + 1 WHERE id = $1 RETURNING {POST_COLUMNS}"
        ))
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn increment_reports(&self, post_id: Uuid) -> Result<bool> {
        let result = sqlx::query("UPDATE posts SET report_count = report_count + 1 WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn reset_reports(&self, post_id: Uuid) -> Result<bool> {
        let result = sqlx::query("UPDATE posts SET report_count = 0 WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_posts_by_author(&self, account_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM posts WHERE account_id = $1")
            .bind(account_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
