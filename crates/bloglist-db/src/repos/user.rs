use anyhow::{Context, Result};
use sqlx::SqlitePool;

/// A user row as stored, including the password hash.
/// Never serialize this outward; API responses pick fields explicitly.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub user_id: String,
    pub username: String,
    pub name: String,
    pub password_hash: String,
}

pub struct UserRepo;

impl UserRepo {
    pub async fn create(
        pool: &SqlitePool,
        user_id: &str,
        username: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (user_id, username, name, password_hash)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(username)
        .bind(name)
        .bind(password_hash)
        .execute(pool)
        .await
        .context("Failed to create user")?;
        Ok(())
    }

    pub async fn get_by_id(pool: &SqlitePool, user_id: &str) -> Result<Option<UserRow>> {
        let user = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, username, name, password_hash
            FROM users
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .context("Failed to get user by id")?;
        Ok(user)
    }

    pub async fn get_by_username(pool: &SqlitePool, username: &str) -> Result<Option<UserRow>> {
        let user = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, username, name, password_hash
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await
        .context("Failed to get user by username")?;
        Ok(user)
    }

    pub async fn list(pool: &SqlitePool) -> Result<Vec<UserRow>> {
        let users = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, username, name, password_hash
            FROM users
            ORDER BY created_at, username
            "#,
        )
        .fetch_all(pool)
        .await
        .context("Failed to list users")?;
        Ok(users)
    }
}
