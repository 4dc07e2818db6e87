use async_trait::async_trait;
use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::{
    models::users::{ProfileUpdate, User},
    Result,
};

use super::PostgresRepo;

const USER_COLUMNS: &str = "id, first_name, last_name, address, phone_number, occupation, email, password, image_profile, created_at";

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert_user(&self, user: &User) -> Result<()>;
    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    /// All users, newest first. Admin moderation view.
    async fn all_users(&self) -> Result<Vec<User>>;
    async fn update_profile(&self, user_id: Uuid, update: &ProfileUpdate) -> Result<bool>;
    async fn update_password_by_email(&self, email: &str, password_hash: &str) -> Result<bool>;
    async fn delete_user(&self, user_id: Uuid) -> Result<bool>;
}

#[async_trait]
impl UserRepository for PostgresRepo {
    async fn insert_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, first_name, last_name, address, phone_number, occupation, email, password, image_profile, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.address)
        .bind(&user.phone_number)
        .bind(&user.occupation)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.image_profile)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn all_users(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn update_profile(&self, user_id: Uuid, update: &ProfileUpdate) -> Result<bool> {
        let mut qb = QueryBuilder::new("UPDATE users SET first_name = ");
        qb.push_bind(update.first_name.clone());
        qb.push(", last_name = ");
        qb.push_bind(update.last_name.clone());
        qb.push(", address = ");
        qb.push_bind(update.address.clone());
        qb.push(", phone_number = ");
        qb.push_bind(update.phone_number.clone());
        qb.push(", occupation = ");
        qb.push_bind(update.occupation.clone());
        if let Some(image) = &update.image_profile {
            qb.push(", image_profile = ");
            qb.push_bind(image.clone());
        }
        qb.push(" WHERE id = ");
        qb.push_bind(user_id);

        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_password_by_email(&self, email: &str, password_hash: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET password = $1 WHERE email = $2")
            .bind(password_hash)
            .bind(email)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
